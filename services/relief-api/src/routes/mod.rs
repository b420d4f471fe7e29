pub mod catalog;
pub mod common;
pub mod reports;
pub mod status;
pub mod triage;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _| common::extractor_error(err));
    let query = web::QueryConfig::default().error_handler(|err, _| common::extractor_error(err));
    let path = web::PathConfig::default().error_handler(|err, _| common::extractor_error(err));
    cfg.app_data(json).app_data(query).app_data(path);

    cfg.service(status::health)
        .service(status::status)
        .service(catalog::catalog)
        .service(reports::report_stats)
        .service(reports::list_reports)
        .service(reports::get_report)
        .service(reports::create_report)
        .service(reports::update_report_status)
        .service(reports::claim_report)
        .service(triage::triage_queue);
}

#[cfg(test)]
mod tests {
    use super::configure;
    use crate::state::AppState;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::{web, App};
    use relief_config::ServiceConfig;
    use relief_core::MINUTE_MS;
    use relief_registry::{ReportRegistry, SharedRegistry, TransitionPolicy};
    use serde_json::{json, Value};

    fn app_state(registry: ReportRegistry) -> web::Data<AppState> {
        web::Data::new(AppState {
            config: ServiceConfig::from_env("relief-api"),
            registry: SharedRegistry::new(registry),
        })
    }

    fn seeded() -> ReportRegistry {
        let mut registry = ReportRegistry::new();
        registry.seed_demo(120 * MINUTE_MS);
        registry
    }

    fn flood_report() -> Value {
        json!({
            "name": "王小明",
            "phone": "0912345678",
            "address": "新北市汐止區大同路123號",
            "urgency": "critical",
            "type": "淹水",
            "peopleCount": "2"
        })
    }

    fn ids(reports: &[Value]) -> Vec<&str> {
        reports
            .iter()
            .map(|report| report["id"].as_str().unwrap_or_default())
            .collect()
    }

    #[actix_web::test]
    async fn intake_then_claim_moves_report_out_of_pending() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(ReportRegistry::new()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/v1/reports")
            .set_json(flood_report())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let report: Value = test::read_body_json(resp).await;
        assert_eq!(report["status"], "pending");
        assert_eq!(report["estimatedWaitTime"], "10-15分鐘");
        assert_eq!(report["peopleCount"], "2");
        let id = report["id"].as_str().unwrap().to_string();

        let req = TestRequest::post()
            .uri(&format!("/v1/reports/{id}/claim"))
            .to_request();
        let claimed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(claimed["status"], "in-progress");

        let req = TestRequest::get()
            .uri("/v1/reports?status=pending")
            .to_request();
        let pending: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(pending.is_empty());

        let req = TestRequest::get()
            .uri("/v1/reports?status=in-progress")
            .to_request();
        let in_progress: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&in_progress), [id.as_str()]);
    }

    #[actix_web::test]
    async fn intake_reports_every_missing_field() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(ReportRegistry::new()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/v1/reports")
            .set_json(json!({
                "name": "",
                "phone": "0912345678",
                "address": "台北市",
                "urgency": "",
                "type": "火災"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"], json!(["name", "urgency"]));

        let mut bad_urgency = flood_report();
        bad_urgency["urgency"] = json!("severe");
        let req = TestRequest::post()
            .uri("/v1/reports")
            .set_json(bad_urgency)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::get().uri("/v1/reports/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["total"], 0);
    }

    #[actix_web::test]
    async fn numeric_people_count_is_stored_as_text() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(ReportRegistry::new()))
                .configure(configure),
        )
        .await;

        let mut report = flood_report();
        report["peopleCount"] = json!(2);
        let req = TestRequest::post()
            .uri("/v1/reports")
            .set_json(report)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["peopleCount"], "2");
    }

    #[actix_web::test]
    async fn malformed_bodies_get_json_errors() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(seeded()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/v1/reports")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));

        let mut mistyped = flood_report();
        mistyped["name"] = json!(42);
        let req = TestRequest::post()
            .uri("/v1/reports")
            .set_json(mistyped)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());

        let req = TestRequest::post()
            .uri("/v1/reports/1/status")
            .set_json(json!({ "state": "completed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());

        let req = TestRequest::get().uri("/v1/reports/1").to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["status"], "pending");
    }

    #[actix_web::test]
    async fn search_filters_and_sorts() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(seeded()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::get()
            .uri("/v1/reports?q=%E6%B7%B9%E6%B0%B4")
            .to_request();
        let flooded: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&flooded), ["1"]);

        let req = TestRequest::get()
            .uri("/v1/reports?status=all&urgency=all&sort=status")
            .to_request();
        let by_status: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&by_status), ["1", "3", "2"]);

        let req = TestRequest::get()
            .uri("/v1/reports?urgency=medium")
            .to_request();
        let medium: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&medium), ["3"]);

        let req = TestRequest::get().uri("/v1/reports?sort=distance").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn lookup_and_status_updates() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(seeded()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::get().uri("/v1/reports/2").to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["name"], "李美華");

        let req = TestRequest::get().uri("/v1/reports/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::post()
            .uri("/v1/reports/2/status")
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["status"], "completed");

        let req = TestRequest::post()
            .uri("/v1/reports/2/status")
            .set_json(json!({ "status": "closed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::post()
            .uri("/v1/reports/42/status")
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = TestRequest::get().uri("/v1/reports/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["total"], 3);
        assert_eq!(stats["pending"], 2);
        assert_eq!(stats["completed"], 1);
        assert_eq!(stats["inProgress"], 0);
    }

    #[actix_web::test]
    async fn strict_policy_returns_conflict() {
        let mut registry = ReportRegistry::with_policy(TransitionPolicy::Strict);
        registry.seed_demo(120 * MINUTE_MS);
        let app = test::init_service(
            App::new()
                .app_data(app_state(registry))
                .configure(configure),
        )
        .await;

        let req = TestRequest::post()
            .uri("/v1/reports/1/status")
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = TestRequest::get().uri("/v1/reports/1").to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["status"], "pending");
    }

    #[actix_web::test]
    async fn triage_catalog_and_health() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(seeded()))
                .configure(configure),
        )
        .await;

        let req = TestRequest::get().uri("/v1/triage").to_request();
        let triage: Value = test::call_and_read_body_json(&app, req).await;
        let queue = triage["reports"].as_array().unwrap();
        assert_eq!(ids(queue), ["1", "3"]);
        assert_eq!(triage["pendingByUrgency"]["critical"], 1);
        assert_eq!(triage["pendingByUrgency"]["high"], 0);

        let req = TestRequest::get().uri("/v1/catalog").to_request();
        let catalog: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(catalog["disasterTypes"].as_array().unwrap().len(), 9);
        assert_eq!(catalog["urgencyLevels"][0]["value"], "critical");
        assert_eq!(catalog["urgencyLevels"][0]["estimatedWaitTime"], "10-15分鐘");
        assert_eq!(catalog["statuses"][1]["value"], "in-progress");

        let req = TestRequest::get().uri("/health").to_request();
        let health: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["status"], "ok");

        let req = TestRequest::get().uri("/v1/status").to_request();
        let status: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(status["reportCount"], 3);
        assert!(status["timestampMs"].is_u64());
        assert!(status.get("report_count").is_none());
    }
}
