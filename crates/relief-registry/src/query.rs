//! Read-only views over a report snapshot. Every function here is a linear
//! scan, recomputed on each call.

use relief_core::{DisasterReport, ErrorCode, ReliefError, ReportStatus, Urgency};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Urgency rank, most urgent first.
    #[default]
    Priority,
    /// Timestamp, most recent first.
    Time,
    /// Status rank, pending first.
    Status,
}

impl FromStr for SortKey {
    type Err = ReliefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(Self::Priority),
            "time" => Ok(Self::Time),
            "status" => Ok(Self::Status),
            other => Err(ReliefError::new(
                ErrorCode::InvalidInput,
                format!("unknown sort key '{other}'"),
            )),
        }
    }
}

/// Stable in-place sort; reports that compare equal keep their relative order.
pub fn sort_reports(reports: &mut [DisasterReport], key: SortKey) {
    match key {
        SortKey::Priority => reports.sort_by(|a, b| b.urgency.rank().cmp(&a.urgency.rank())),
        SortKey::Time => reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortKey::Status => reports.sort_by(|a, b| b.status.rank().cmp(&a.status.rank())),
    }
}

pub fn sorted_by(reports: &[DisasterReport], key: SortKey) -> Vec<DisasterReport> {
    let mut sorted = reports.to_vec();
    sort_reports(&mut sorted, key);
    sorted
}

pub fn by_status(reports: &[DisasterReport], status: ReportStatus) -> Vec<DisasterReport> {
    reports
        .iter()
        .filter(|report| report.status == status)
        .cloned()
        .collect()
}

pub fn by_urgency(reports: &[DisasterReport], urgency: Urgency) -> Vec<DisasterReport> {
    reports
        .iter()
        .filter(|report| report.urgency == urgency)
        .cloned()
        .collect()
}

/// Exact lookup of a report number as typed by a user. Surrounding
/// whitespace is ignored and a blank number finds nothing.
pub fn find_by_id<'a>(reports: &'a [DisasterReport], id: &str) -> Option<&'a DisasterReport> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    reports.iter().find(|report| report.id.as_str() == id)
}

/// Pending reports, most urgent first. This is the volunteer's work list.
pub fn triage_queue(reports: &[DisasterReport]) -> Vec<DisasterReport> {
    let mut pending = by_status(reports, ReportStatus::Pending);
    sort_reports(&mut pending, SortKey::Priority);
    pending
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub term: String,
    pub status: Option<ReportStatus>,
    pub urgency: Option<Urgency>,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: Option<ReportStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_urgency(mut self, urgency: Option<Urgency>) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn matches(&self, report: &DisasterReport) -> bool {
        self.matches_term(report)
            && self.status.is_none_or(|status| report.status == status)
            && self.urgency.is_none_or(|urgency| report.urgency == urgency)
    }

    fn matches_term(&self, report: &DisasterReport) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let term = self.term.to_lowercase();
        [&report.name, &report.address, &report.disaster_type]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

pub fn search(reports: &[DisasterReport], filter: &SearchFilter) -> Vec<DisasterReport> {
    reports
        .iter()
        .filter(|report| filter.matches(report))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    pub fn get(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::Critical => self.critical,
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::Low => self.low,
        }
    }

    fn increment(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Critical => self.critical += 1,
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub by_urgency: UrgencyCounts,
    pub pending_by_urgency: UrgencyCounts,
}

impl ReportStats {
    pub fn count_status(&self, status: ReportStatus) -> usize {
        match status {
            ReportStatus::Pending => self.pending,
            ReportStatus::InProgress => self.in_progress,
            ReportStatus::Completed => self.completed,
        }
    }
}

pub fn stats(reports: &[DisasterReport]) -> ReportStats {
    let mut stats = ReportStats {
        total: reports.len(),
        ..ReportStats::default()
    };
    for report in reports {
        match report.status {
            ReportStatus::Pending => {
                stats.pending += 1;
                stats.pending_by_urgency.increment(report.urgency);
            }
            ReportStatus::InProgress => stats.in_progress += 1,
            ReportStatus::Completed => stats.completed += 1,
        }
        stats.by_urgency.increment(report.urgency);
    }
    stats
}
