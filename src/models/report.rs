use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a report. `pending` is the initial state; `approved`
/// and `denied` are terminal and a report never leaves either of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
    Denied,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
            ReportStatus::Denied => "denied",
        }
    }
}

/// A single user-submitted abuse claim.
///
/// Lives in exactly one of the store's two collections at any time. Field
/// names on the wire are camelCase to match the queue's JSON format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Opaque identifier, 16 lowercase hex characters
    pub id: String,
    /// User id the report was filed against
    pub target: i64,
    /// User id of the reporting user
    pub reporter: i64,
    /// What happened, trimmed
    pub context: String,
    /// Short reason tag, trimmed when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Creation instant, immutable
    pub timestamp: DateTime<Utc>,
    /// Originating network address, captured at creation
    pub source_address: String,
    /// Lifecycle state
    pub status: ReportStatus,
    /// Set exactly once, when the report is actioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actioned_at: Option<DateTime<Utc>>,
}
