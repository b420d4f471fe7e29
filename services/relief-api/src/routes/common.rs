use actix_web::error::InternalError;
use actix_web::HttpResponse;
use relief_core::{ErrorCode, ReliefError, ReportField};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ReportField>,
}

fn error_body(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: message.into(),
        fields: Vec::new(),
    }
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body(message))
}

pub fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(error_body(message))
}

pub fn conflict(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(error_body(message))
}

pub fn internal_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(error_body(message))
}

/// Turns a body, query or path extraction failure into the same JSON error
/// shape the handlers return.
pub fn extractor_error<E>(err: E) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    tracing::debug!(error = %err, "rejected malformed request");
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn relief_error(err: ReliefError) -> HttpResponse {
    match err.code {
        ErrorCode::InvalidInput => HttpResponse::BadRequest().json(ErrorResponse {
            error: err.message,
            fields: err.fields,
        }),
        ErrorCode::InvalidTransition => conflict(err.message),
        ErrorCode::NotFound => not_found(err.message),
        ErrorCode::Internal => internal_error(err.message),
    }
}

/// Parses an optional filter parameter. Absent, blank and `all` all mean
/// "no filter".
pub fn parse_filter<T>(value: Option<&str>) -> Result<Option<T>, HttpResponse>
where
    T: FromStr<Err = ReliefError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(relief_error),
    }
}
