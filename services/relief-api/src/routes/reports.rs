use actix_web::{get, post, web, HttpResponse};
use relief_core::{NewReport, ReportId, ReportStatus, Urgency};
use relief_registry::{SearchFilter, SortKey};
use serde::Deserialize;

use crate::routes::common::{bad_request, not_found, parse_filter, relief_error};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub urgency: Option<String>,
    pub sort: Option<String>,
}

#[get("/v1/reports")]
pub async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let status = match parse_filter::<ReportStatus>(query.status.as_deref()) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let urgency = match parse_filter::<Urgency>(query.urgency.as_deref()) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let sort = match parse_filter::<SortKey>(query.sort.as_deref()) {
        Ok(value) => value,
        Err(response) => return response,
    };

    let filter = SearchFilter::new(query.q.clone().unwrap_or_default())
        .with_status(status)
        .with_urgency(urgency);
    HttpResponse::Ok().json(state.registry.search(&filter, sort))
}

#[get("/v1/reports/stats")]
pub async fn report_stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.registry.stats())
}

#[get("/v1/reports/{id}")]
pub async fn get_report(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    match state.registry.by_id(&id) {
        Some(report) => HttpResponse::Ok().json(report),
        None => not_found(format!("report {} not found", id.trim())),
    }
}

/// Intake form body. Urgency stays a raw string so an unselected value ("")
/// is reported as a missing field rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(rename = "type", default)]
    pub disaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "relief_core::deserialize_people_count")]
    pub people_count: String,
}

impl IntakeRequest {
    fn into_new_report(self) -> Result<NewReport, HttpResponse> {
        let urgency = parse_filter::<Urgency>(self.urgency.as_deref())?;
        Ok(NewReport {
            name: self.name,
            phone: self.phone,
            address: self.address,
            urgency,
            disaster_type: self.disaster_type,
            description: self.description,
            people_count: self.people_count,
        })
    }
}

#[post("/v1/reports")]
pub async fn create_report(
    state: web::Data<AppState>,
    payload: web::Json<IntakeRequest>,
) -> HttpResponse {
    let input = match payload.into_inner().into_new_report() {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.registry.create(input) {
        Ok(report) => HttpResponse::Created().json(report),
        Err(err) => relief_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[post("/v1/reports/{id}/status")]
pub async fn update_report_status(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<StatusUpdate>,
) -> HttpResponse {
    let status = match payload.status.parse::<ReportStatus>() {
        Ok(status) => status,
        Err(err) => return bad_request(err.message),
    };
    apply_status(&state, &id, status)
}

/// A volunteer takes the case.
#[post("/v1/reports/{id}/claim")]
pub async fn claim_report(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    apply_status(&state, &id, ReportStatus::InProgress)
}

fn apply_status(state: &AppState, id: &str, status: ReportStatus) -> HttpResponse {
    let id = ReportId::from(id.trim());
    match state.registry.update_status(&id, status) {
        Ok(Some(report)) => HttpResponse::Ok().json(report),
        // The registry treats an unknown id as a no-op; callers still get told.
        Ok(None) => not_found(format!("report {} not found", id)),
        Err(err) => relief_error(err),
    }
}
