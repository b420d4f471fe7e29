use crate::observer::RegistryObserver;
use crate::query::{self, ReportStats, SearchFilter, SortKey};
use crate::registry::ReportRegistry;
use relief_core::{DisasterReport, NewReport, ReliefResult, ReportId, ReportStatus};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to one registry, for callers on several threads. Every
/// operation takes the single lock around the collection.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<ReportRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ReportRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    // Registry operations leave the collection consistent even if an observer
    // panics mid-notification, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ReportRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_observer(&self, observer: Box<dyn RegistryObserver>) {
        self.lock().add_observer(observer);
    }

    pub fn create(&self, input: NewReport) -> ReliefResult<DisasterReport> {
        self.lock().create(input)
    }

    pub fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> ReliefResult<Option<DisasterReport>> {
        Ok(self.lock().update_status(id, status)?.cloned())
    }

    pub fn claim(&self, id: &ReportId) -> ReliefResult<Option<DisasterReport>> {
        self.update_status(id, ReportStatus::InProgress)
    }

    pub fn complete(&self, id: &ReportId) -> ReliefResult<Option<DisasterReport>> {
        self.update_status(id, ReportStatus::Completed)
    }

    /// Copy of the whole collection, newest first.
    pub fn snapshot(&self) -> Vec<DisasterReport> {
        self.lock().reports().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<DisasterReport> {
        self.lock().by_id(id).cloned()
    }

    pub fn by_status(&self, status: ReportStatus) -> Vec<DisasterReport> {
        self.lock().by_status(status)
    }

    /// Filtered view, optionally re-ordered. Without a sort key the
    /// collection order is kept.
    pub fn search(&self, filter: &SearchFilter, sort: Option<SortKey>) -> Vec<DisasterReport> {
        let mut reports = self.lock().search(filter);
        if let Some(key) = sort {
            query::sort_reports(&mut reports, key);
        }
        reports
    }

    pub fn triage_queue(&self) -> Vec<DisasterReport> {
        self.lock().triage_queue()
    }

    pub fn stats(&self) -> ReportStats {
        self.lock().stats()
    }
}
