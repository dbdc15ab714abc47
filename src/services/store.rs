use crate::error::{AppError, AppResult};
use crate::models::{Report, ReportStatus};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Collections {
    pending: Vec<Report>,
    actioned: Vec<Report>,
}

/// In-process owner of all report entities for their entire lifetime.
///
/// Both collections keep insertion order, which is the iteration order
/// readers see. Nothing is persisted: a restart starts from two empty
/// collections.
///
/// Every operation takes the one inner lock, so a pending report moves to
/// the actioned collection as a single step and a reader can never observe
/// it in neither collection.
#[derive(Clone, Default)]
pub struct ReportStore {
    inner: Arc<Mutex<Collections>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new pending report, returning the pending count afterwards.
    pub fn add_pending(&self, report: Report) -> usize {
        let mut inner = self.lock();
        inner.pending.push(report);
        inner.pending.len()
    }

    /// Clone both collections in insertion order.
    pub fn snapshot(&self) -> (Vec<Report>, Vec<Report>) {
        let inner = self.lock();
        (inner.pending.clone(), inner.actioned.clone())
    }

    pub fn counts(&self) -> (usize, usize) {
        let inner = self.lock();
        (inner.pending.len(), inner.actioned.len())
    }

    /// Move a pending report into the actioned collection with a terminal
    /// status and a fresh action timestamp.
    ///
    /// The lookup only sees the pending collection, so an id that was
    /// already actioned comes back as `NotFound` just like an id that never
    /// existed. Transitions are one-way: nothing ever re-enters pending.
    pub fn action(&self, report_id: &str, status: ReportStatus) -> AppResult<Report> {
        let mut inner = self.lock();

        let position = inner
            .pending
            .iter()
            .position(|report| report.id == report_id)
            .ok_or(AppError::NotFound)?;

        let mut report = inner.pending.remove(position);
        report.status = status;
        report.actioned_at = Some(Utc::now());
        inner.actioned.push(report.clone());

        Ok(report)
    }
}
