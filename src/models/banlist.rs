use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Report;

/// One row of the external ban list. Appended when a report is approved and
/// never modified or deduplicated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanEntry {
    pub target_id: i64,
    pub reporter_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub context: String,
    pub date_added: DateTime<Utc>,
    pub source_report_id: String,
}

impl BanEntry {
    pub fn from_report(report: &Report) -> Self {
        Self {
            target_id: report.target,
            reporter_id: report.reporter,
            reason: report.reason.clone(),
            context: report.context.clone(),
            date_added: Utc::now(),
            source_report_id: report.id.clone(),
        }
    }
}

/// The external ban-list document, stored as one JSON blob behind a version
/// token. Reads are tolerant: a missing `bannedUsers` field deserializes to
/// an empty list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanListDocument {
    #[serde(default)]
    pub banned_users: Vec<BanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
