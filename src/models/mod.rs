pub mod banlist;
pub mod report;

pub use banlist::{BanEntry, BanListDocument};
pub use report::{Report, ReportStatus};
