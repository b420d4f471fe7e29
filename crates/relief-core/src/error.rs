use crate::domain::{ReportField, ReportStatus};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    InvalidTransition,
    NotFound,
    Internal,
}

#[derive(Debug, Clone)]
pub struct ReliefError {
    pub code: ErrorCode,
    pub message: String,
    /// Required intake fields that were missing, for validation failures.
    pub fields: Vec<ReportField>,
}

impl ReliefError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn validation(fields: Vec<ReportField>) -> Self {
        let names = fields
            .iter()
            .map(|field| format!("{} ({})", field.as_str(), field.label()))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            code: ErrorCode::InvalidInput,
            message: format!("missing required fields: {names}"),
            fields,
        }
    }

    pub fn invalid_transition(from: ReportStatus, to: ReportStatus) -> Self {
        Self::new(
            ErrorCode::InvalidTransition,
            format!("status change {} -> {} is not allowed", from, to),
        )
    }

    pub fn is_validation(&self) -> bool {
        self.code == ErrorCode::InvalidInput && !self.fields.is_empty()
    }
}

impl fmt::Display for ReliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ReliefError {}

pub type ReliefResult<T> = Result<T, ReliefError>;
