use crate::observer::{RegistryEvent, RegistryObserver};
use crate::policy::TransitionPolicy;
use crate::query::{self, ReportStats, SearchFilter, SortKey};
use relief_core::{
    now_epoch_millis, DisasterReport, EpochMillis, NewReport, ReliefResult, ReportId,
    ReportStatus, Urgency,
};
use std::fmt;

/// Owner of every disaster report. Reports are kept newest first and are
/// never removed.
pub struct ReportRegistry {
    reports: Vec<DisasterReport>,
    next_sequence: u64,
    policy: TransitionPolicy,
    observers: Vec<Box<dyn RegistryObserver>>,
}

impl ReportRegistry {
    pub fn new() -> Self {
        Self::with_policy(TransitionPolicy::default())
    }

    pub fn with_policy(policy: TransitionPolicy) -> Self {
        Self {
            reports: Vec::new(),
            next_sequence: 1,
            policy,
            observers: Vec::new(),
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn add_observer(&mut self, observer: Box<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    pub fn create(&mut self, input: NewReport) -> ReliefResult<DisasterReport> {
        self.create_at(input, now_epoch_millis())
    }

    /// Validates and stores a new report stamped with `timestamp`. On a
    /// validation error nothing is stored.
    pub fn create_at(
        &mut self,
        input: NewReport,
        timestamp: EpochMillis,
    ) -> ReliefResult<DisasterReport> {
        let urgency = match input.validate() {
            Ok(urgency) => urgency,
            Err(err) => {
                metrics::counter!("relief_report_validation_failures_total").increment(1);
                tracing::debug!(error = %err, "rejected disaster report");
                return Err(err);
            }
        };

        let id = self.issue_id();
        let report = input.into_report(id, urgency, timestamp);
        self.reports.insert(0, report.clone());

        metrics::counter!("relief_reports_created_total", "urgency" => urgency.as_str())
            .increment(1);
        tracing::info!(
            report_id = %report.id,
            urgency = %urgency,
            disaster_type = %report.disaster_type,
            wait_time = %report.estimated_wait_time,
            "disaster report created"
        );

        self.notify(&RegistryEvent::ReportCreated {
            report: report.clone(),
        });
        Ok(report)
    }

    /// Sets the status of report `id`. Returns `Ok(None)` without touching
    /// anything when no report has that id. Fails only when the transition
    /// policy rejects the change.
    pub fn update_status(
        &mut self,
        id: &ReportId,
        status: ReportStatus,
    ) -> ReliefResult<Option<&DisasterReport>> {
        let Some(index) = self.reports.iter().position(|report| &report.id == id) else {
            tracing::debug!(report_id = %id, status = %status, "status update for unknown report");
            return Ok(None);
        };

        let from = self.reports[index].status;
        self.policy.check(from, status)?;
        self.reports[index].status = status;

        metrics::counter!("relief_report_status_updates_total", "status" => status.as_str())
            .increment(1);
        tracing::info!(report_id = %id, from = %from, to = %status, "report status changed");

        self.notify(&RegistryEvent::StatusChanged {
            id: id.clone(),
            from,
            to: status,
            at_ms: now_epoch_millis(),
        });
        Ok(Some(&self.reports[index]))
    }

    /// A volunteer takes a pending case.
    pub fn claim(&mut self, id: &ReportId) -> ReliefResult<Option<&DisasterReport>> {
        self.update_status(id, ReportStatus::InProgress)
    }

    pub fn complete(&mut self, id: &ReportId) -> ReliefResult<Option<&DisasterReport>> {
        self.update_status(id, ReportStatus::Completed)
    }

    pub fn reports(&self) -> &[DisasterReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&DisasterReport> {
        query::find_by_id(&self.reports, id)
    }

    pub fn by_status(&self, status: ReportStatus) -> Vec<DisasterReport> {
        query::by_status(&self.reports, status)
    }

    pub fn by_urgency(&self, urgency: Urgency) -> Vec<DisasterReport> {
        query::by_urgency(&self.reports, urgency)
    }

    pub fn search(&self, filter: &SearchFilter) -> Vec<DisasterReport> {
        query::search(&self.reports, filter)
    }

    pub fn sorted_by(&self, key: SortKey) -> Vec<DisasterReport> {
        query::sorted_by(&self.reports, key)
    }

    pub fn triage_queue(&self) -> Vec<DisasterReport> {
        query::triage_queue(&self.reports)
    }

    pub fn stats(&self) -> ReportStats {
        query::stats(&self.reports)
    }

    /// Appends an already-built report without notifying observers, keeping
    /// the id sequence ahead of any numeric id it carries.
    pub(crate) fn insert_existing(&mut self, report: DisasterReport) {
        if let Some(sequence) = report.id.sequence() {
            self.next_sequence = self.next_sequence.max(sequence.saturating_add(1));
        }
        self.reports.push(report);
    }

    fn issue_id(&mut self) -> ReportId {
        loop {
            let id = ReportId::from_sequence(self.next_sequence);
            self.next_sequence += 1;
            if !self.reports.iter().any(|report| report.id == id) {
                return id;
            }
        }
    }

    fn notify(&self, event: &RegistryEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRegistry")
            .field("reports", &self.reports.len())
            .field("next_sequence", &self.next_sequence)
            .field("policy", &self.policy)
            .field("observers", &self.observers.len())
            .finish()
    }
}
