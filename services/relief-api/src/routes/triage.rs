use actix_web::{get, web, HttpResponse};
use relief_core::DisasterReport;
use relief_registry::{query, UrgencyCounts};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriageResponse {
    pending_by_urgency: UrgencyCounts,
    reports: Vec<DisasterReport>,
}

/// Pending reports for volunteers, most urgent first.
#[get("/v1/triage")]
pub async fn triage_queue(state: web::Data<AppState>) -> HttpResponse {
    let snapshot = state.registry.snapshot();

    HttpResponse::Ok().json(TriageResponse {
        pending_by_urgency: query::stats(&snapshot).pending_by_urgency,
        reports: query::triage_queue(&snapshot),
    })
}
