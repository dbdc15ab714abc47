pub mod id;
pub mod password;

pub use id::generate_report_id;
pub use password::hash_credential;
