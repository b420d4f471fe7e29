use relief_config::ServiceConfig;
use relief_registry::SharedRegistry;

pub struct AppState {
    pub config: ServiceConfig,
    pub registry: SharedRegistry,
}
