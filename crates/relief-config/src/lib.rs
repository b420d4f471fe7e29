use relief_registry::TransitionPolicy;
use serde::{Deserialize, Serialize};
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

/// Source of configuration values, keyed by variable name.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub region: Option<String>,
    pub bind_addr: String,
    pub metrics_addr: Option<String>,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        Self::from_lookup(default_service_name, &process_env)
    }

    fn from_lookup(default_service_name: &str, lookup: Lookup<'_>) -> Self {
        Self {
            service_name: var_or(lookup, "RELIEF_SERVICE_NAME", default_service_name),
            environment: Environment::from_env(&var_or(lookup, "RELIEF_ENV", "local")),
            region: lookup("RELIEF_REGION"),
            bind_addr: var_or(lookup, "RELIEF_BIND_ADDR", "0.0.0.0:8080"),
            metrics_addr: lookup("RELIEF_METRICS_ADDR"),
            log_level: var_or(lookup, "RELIEF_LOG_LEVEL", "info"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub seed_demo: bool,
    pub transition_policy: TransitionPolicy,
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(lookup: Lookup<'_>) -> Self {
        let transition_policy = match lookup("RELIEF_TRANSITION_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "invalid RELIEF_TRANSITION_POLICY, using permissive");
                TransitionPolicy::Permissive
            }),
            None => TransitionPolicy::default(),
        };

        Self {
            seed_demo: var_bool(lookup, "RELIEF_SEED_DEMO", false),
            transition_policy,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook receiving report events. Notifications are off when unset.
    pub webhook_url: Option<String>,
    pub timeout_ms: u64,
}

impl NotifyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    fn from_lookup(lookup: Lookup<'_>) -> Self {
        let webhook_url = lookup("RELIEF_WEBHOOK_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self {
            webhook_url,
            timeout_ms: var_u64(lookup, "RELIEF_WEBHOOK_TIMEOUT_MS", 5_000),
        }
    }

    pub fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }
}

fn var_or(lookup: Lookup<'_>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn var_u64(lookup: Lookup<'_>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn var_bool(lookup: Lookup<'_>, key: &str, default: bool) -> bool {
    lookup(key)
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn service_defaults() {
        let config = ServiceConfig::from_lookup("relief-api", &source(&[]));
        assert_eq!(config.service_name, "relief-api");
        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn service_overrides() {
        let lookup = source(&[
            ("RELIEF_ENV", "Production"),
            ("RELIEF_BIND_ADDR", "127.0.0.1:9000"),
            ("RELIEF_METRICS_ADDR", "127.0.0.1:9100"),
        ]);
        let config = ServiceConfig::from_lookup("relief-api", &lookup);
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.metrics_addr.as_deref(), Some("127.0.0.1:9100"));
    }

    #[test]
    fn registry_settings() {
        let config = RegistryConfig::from_lookup(&source(&[
            ("RELIEF_SEED_DEMO", "yes"),
            ("RELIEF_TRANSITION_POLICY", "STRICT"),
        ]));
        assert!(config.seed_demo);
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);

        let config = RegistryConfig::from_lookup(&source(&[
            ("RELIEF_SEED_DEMO", "maybe"),
            ("RELIEF_TRANSITION_POLICY", "chaotic"),
        ]));
        assert!(!config.seed_demo);
        assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
    }

    #[test]
    fn blank_webhook_disables_notifications() {
        let config = NotifyConfig::from_lookup(&source(&[("RELIEF_WEBHOOK_URL", "  ")]));
        assert!(!config.enabled());
        assert_eq!(config.timeout_ms, 5_000);

        let config = NotifyConfig::from_lookup(&source(&[
            ("RELIEF_WEBHOOK_URL", "https://hooks.example.test/relief"),
            ("RELIEF_WEBHOOK_TIMEOUT_MS", "250"),
        ]));
        assert!(config.enabled());
        assert_eq!(config.timeout_ms, 250);
    }
}
