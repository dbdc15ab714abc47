use crate::error::{AppError, AppResult};
use crate::models::Report;
use crate::services::banlist::BanListService;
use crate::services::notify::NotificationService;
use crate::services::report::ReportService;
use crate::services::store::ReportStore;
use axum::{
    extract::ConnectInfo,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitReportRequest {
    /// User id the report is filed against
    pub target: Option<i64>,
    /// User id of the reporting user
    pub reporter: Option<i64>,
    /// What happened (required)
    #[validate(length(max = 2000))]
    pub context: Option<String>,
    /// Short reason tag
    #[validate(length(max = 200))]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitReportResponse {
    pub success: bool,
    pub message: String,
    /// Id of the newly created report
    pub report_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionReportRequest {
    /// Id of the pending report
    pub report_id: Option<String>,
    /// Decision, either "approved" or "denied"
    pub action: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionReportResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportQueueResponse {
    /// Reports awaiting a decision, oldest first
    pub pending: Vec<Report>,
    /// Decided reports, in decision order
    pub actioned: Vec<Report>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = SubmitReportRequest,
    responses(
        (status = 201, description = "Report submitted", body = SubmitReportResponse),
        (status = 400, description = "Missing or invalid fields", body = AppError),
        (status = 429, description = "Rate limit exceeded"),
    ),
    tag = "reports"
)]
pub async fn submit_report(
    Extension(store): Extension<ReportStore>,
    Extension(notifier): Extension<NotificationService>,
    Extension(ban_list): Extension<BanListService>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<SubmitReportRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match (
        payload.target,
        payload.reporter,
        non_empty(payload.context.as_deref()),
    ) {
        (Some(target), Some(reporter), Some(context)) => {
            let service = ReportService::new(store, notifier, ban_list);
            let report = service.submit(
                target,
                reporter,
                context,
                payload.reason.as_deref(),
                addr.ip().to_string(),
            )?;

            Ok((
                StatusCode::CREATED,
                Json(SubmitReportResponse {
                    success: true,
                    message: "Report submitted for review".to_string(),
                    report_id: report.id,
                }),
            ))
        }
        (target, reporter, context) => {
            let mut missing = Vec::new();
            if target.is_none() {
                missing.push("target");
            }
            if reporter.is_none() {
                missing.push("reporter");
            }
            if context.is_none() {
                missing.push("context");
            }
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    responses(
        (status = 200, description = "Pending and actioned reports", body = ReportQueueResponse),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    Extension(store): Extension<ReportStore>,
) -> AppResult<impl IntoResponse> {
    let (pending, actioned) = store.snapshot();
    Ok(Json(ReportQueueResponse { pending, actioned }))
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/action",
    request_body = ActionReportRequest,
    responses(
        (status = 200, description = "Report actioned", body = ActionReportResponse),
        (status = 400, description = "Invalid action or missing id", body = AppError),
        (status = 404, description = "No pending report with that id", body = AppError),
    ),
    tag = "reports"
)]
pub async fn action_report(
    Extension(store): Extension<ReportStore>,
    Extension(notifier): Extension<NotificationService>,
    Extension(ban_list): Extension<BanListService>,
    Json(payload): Json<ActionReportRequest>,
) -> AppResult<impl IntoResponse> {
    let report_id = non_empty(payload.report_id.as_deref())
        .ok_or_else(|| AppError::Validation("Missing required field: reportId".to_string()))?;
    let action = non_empty(payload.action.as_deref())
        .ok_or_else(|| AppError::Validation("Missing required field: action".to_string()))?;

    let service = ReportService::new(store, notifier, ban_list);
    let report = service.action(report_id, action)?;

    Ok(Json(ActionReportResponse {
        success: true,
        message: format!("Report {}", report.status.as_str()),
    }))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
