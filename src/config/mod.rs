use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub forms: FormsConfig,
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Propagate not-found and structural errors instead of leaving the schema unchanged
    pub strict_references: bool,
    pub suffix_max_attempts: u32,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub validate_on_load: bool,
    pub pretty_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Forms overrides
        if let Ok(v) = env::var("FORMS_STRICT_REFERENCES") {
            self.forms.strict_references = v.parse().unwrap_or(self.forms.strict_references);
        }
        if let Ok(v) = env::var("FORMS_SUFFIX_MAX_ATTEMPTS") {
            self.forms.suffix_max_attempts = v.parse().unwrap_or(self.forms.suffix_max_attempts);
        }
        if let Ok(v) = env::var("FORMS_DEBUG_LOGGING") {
            self.forms.debug_logging = v.parse().unwrap_or(self.forms.debug_logging);
        }

        // CLI overrides
        if let Ok(v) = env::var("FORMS_VALIDATE_ON_LOAD") {
            self.cli.validate_on_load = v.parse().unwrap_or(self.cli.validate_on_load);
        }
        if let Ok(v) = env::var("CLI_PRETTY_JSON") {
            self.cli.pretty_json = v.parse().unwrap_or(self.cli.pretty_json);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            forms: FormsConfig {
                strict_references: true,
                suffix_max_attempts: 20,
                debug_logging: true,
            },
            cli: CliConfig {
                validate_on_load: true,
                pretty_json: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            forms: FormsConfig {
                strict_references: false,
                suffix_max_attempts: 20,
                debug_logging: true,
            },
            cli: CliConfig {
                validate_on_load: true,
                pretty_json: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            forms: FormsConfig {
                strict_references: false,
                suffix_max_attempts: 10,
                debug_logging: false,
            },
            cli: CliConfig {
                validate_on_load: false,
                pretty_json: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
