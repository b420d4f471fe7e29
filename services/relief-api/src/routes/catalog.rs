use actix_web::{get, HttpResponse};
use relief_core::{ReportStatus, Urgency, DISASTER_TYPES};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UrgencyOption {
    value: Urgency,
    label: &'static str,
    short_label: &'static str,
    estimated_wait_time: &'static str,
}

#[derive(Debug, Serialize)]
struct StatusOption {
    value: ReportStatus,
    label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse {
    disaster_types: &'static [&'static str],
    urgency_levels: Vec<UrgencyOption>,
    statuses: Vec<StatusOption>,
}

/// Choices for the intake form and list filters.
#[get("/v1/catalog")]
pub async fn catalog() -> HttpResponse {
    let urgency_levels = Urgency::ALL
        .into_iter()
        .map(|urgency| UrgencyOption {
            value: urgency,
            label: urgency.label(),
            short_label: urgency.short_label(),
            estimated_wait_time: urgency.estimated_wait_time(),
        })
        .collect();
    let statuses = ReportStatus::ALL
        .into_iter()
        .map(|status| StatusOption {
            value: status,
            label: status.label(),
        })
        .collect();

    HttpResponse::Ok().json(CatalogResponse {
        disaster_types: &DISASTER_TYPES,
        urgency_levels,
        statuses,
    })
}
