//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Process-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "ainews".to_string(),
            environment: "development".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Build configuration from `AINEWS_ENV` and `AINEWS_LOG_JSON`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(environment) = lookup("AINEWS_ENV").filter(|v| !v.trim().is_empty()) {
            config.environment = environment.trim().to_string();
        }

        if let Some(flag) = lookup("AINEWS_LOG_JSON") {
            config.json_logs = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config
    }
}
