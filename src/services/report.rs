use crate::error::{AppError, AppResult};
use crate::models::{Report, ReportStatus};
use crate::services::banlist::BanListService;
use crate::services::notify::{Channel, NotificationService};
use crate::services::store::ReportStore;
use crate::utils::generate_report_id;
use chrono::Utc;

/// Drives the report lifecycle: submission into the pending queue and the
/// one-way pending to actioned transition, with the webhook and ban-list
/// side effects hanging off each step.
pub struct ReportService {
    store: ReportStore,
    notifier: NotificationService,
    ban_list: BanListService,
}

impl ReportService {
    pub fn new(
        store: ReportStore,
        notifier: NotificationService,
        ban_list: BanListService,
    ) -> Self {
        Self {
            store,
            notifier,
            ban_list,
        }
    }

    /// Create a pending report and append it to the queue.
    ///
    /// Field presence has already been checked at the edge; this trims the
    /// text fields, stamps the creation instant and source address, and
    /// fires the submission notification. The notification cannot fail the
    /// submission.
    pub fn submit(
        &self,
        target: i64,
        reporter: i64,
        context: &str,
        reason: Option<&str>,
        source_address: String,
    ) -> AppResult<Report> {
        let report = Report {
            id: generate_report_id()?,
            target,
            reporter,
            context: context.trim().to_string(),
            reason: reason.map(|reason| reason.trim().to_string()),
            timestamp: Utc::now(),
            source_address,
            status: ReportStatus::Pending,
            actioned_at: None,
        };

        let pending_count = self.store.add_pending(report.clone());
        tracing::info!(
            report_id = %report.id,
            target_user = report.target,
            reporter = report.reporter,
            pending_count,
            "Report submitted"
        );

        self.notifier
            .dispatch(Channel::Reports, submission_message(&report, pending_count));

        Ok(report)
    }

    /// Apply a moderator decision to a pending report.
    ///
    /// `decision` must be "approved" or "denied"; the id must belong to a
    /// report still in the pending queue. The actions channel always hears
    /// about the decision; only approvals reach the ban list.
    pub fn action(&self, report_id: &str, decision: &str) -> AppResult<Report> {
        let status = match decision {
            "approved" => ReportStatus::Approved,
            "denied" => ReportStatus::Denied,
            other => {
                return Err(AppError::Validation(format!(
                    "action must be 'approved' or 'denied', got '{}'",
                    other
                )));
            }
        };

        let report = self.store.action(report_id, status)?;
        tracing::info!(
            report_id = %report.id,
            decision = report.status.as_str(),
            "Report actioned"
        );

        self.notifier
            .dispatch(Channel::Actions, action_message(&report));

        if report.status == ReportStatus::Approved {
            self.ban_list.schedule_sync(report.clone());
        }

        Ok(report)
    }
}

fn profile_url(user_id: i64) -> String {
    format!("https://www.roblox.com/users/{}/profile", user_id)
}

fn submission_message(report: &Report, pending_count: usize) -> String {
    format!(
        "New report against user {} (<{}>) filed by {} (<{}>). {} report(s) pending review.",
        report.target,
        profile_url(report.target),
        report.reporter,
        profile_url(report.reporter),
        pending_count
    )
}

fn action_message(report: &Report) -> String {
    format!(
        "Report {} was {}. Target: {} (<{}>). Reporter: {} (<{}>). Context: {}",
        report.id,
        report.status.as_str(),
        report.target,
        profile_url(report.target),
        report.reporter,
        profile_url(report.reporter),
        report.context
    )
}
