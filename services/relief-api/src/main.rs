mod routes;
mod state;

use actix_web::{web, App, HttpServer};
use relief_config::{NotifyConfig, RegistryConfig, ServiceConfig};
use relief_core::now_epoch_millis;
use relief_notify::WebhookNotifier;
use relief_observability::{init, log_startup, ObservabilityConfig};
use relief_registry::{ReportRegistry, SharedRegistry};
use state::AppState;
use std::io;
use std::time::Duration;

fn build_registry(service_name: &str) -> ReportRegistry {
    let registry_config = RegistryConfig::from_env();
    let mut registry = ReportRegistry::with_policy(registry_config.transition_policy);
    if registry_config.seed_demo {
        registry.seed_demo(now_epoch_millis());
    }

    let notify_config = NotifyConfig::from_env();
    if let Some(url) = notify_config.webhook_url.as_deref() {
        let timeout = Duration::from_millis(notify_config.timeout_ms);
        match WebhookNotifier::new(url, timeout, service_name) {
            Ok(notifier) => {
                tracing::info!(url = %notifier.url(), "webhook notifications enabled");
                registry.add_observer(Box::new(notifier));
            }
            Err(err) => tracing::warn!(error = %err, "webhook notifications disabled"),
        }
    }

    tracing::info!(
        policy = ?registry.policy(),
        reports = registry.len(),
        "report registry ready"
    );
    registry
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServiceConfig::from_env("relief-api");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment);

    let registry = SharedRegistry::new(build_registry(&config.service_name));
    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState { config, registry });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
