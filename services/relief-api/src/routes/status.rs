use actix_web::{get, web, HttpResponse};
use relief_core::now_epoch_millis;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness check. Touches nothing but the process.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    service: String,
    environment: String,
    region: Option<String>,
    timestamp_ms: u64,
    report_count: usize,
}

#[get("/v1/status")]
pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    let response = StatusResponse {
        service: state.config.service_name.clone(),
        environment: state.config.environment.to_string(),
        region: state.config.region.clone(),
        timestamp_ms: now_epoch_millis(),
        report_count: state.registry.len(),
    };

    HttpResponse::Ok().json(response)
}
