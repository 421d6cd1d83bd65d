use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKDESK_ENV";
const CONFIG_DIR_ENV: &str = "BOOKDESK_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub messages: MessageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load configuration from an explicit directory and environment name.
    pub fn load_from(config_dir: &std::path::Path, environment: &str) -> anyhow::Result<Self> {
        let environment_enum = Environment::parse(environment)?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("BOOKDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = environment_enum;

        Ok(settings)
    }
}

/// Where the book backend lives and how requests to it behave.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "BackendSettings::default_base_url")]
    pub base_url: String,
    /// Route the update handler navigates to after a successful save.
    #[serde(default = "BackendSettings::default_listing_path")]
    pub listing_path: String,
    /// No timeout is applied when unset.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl BackendSettings {
    fn default_base_url() -> String {
        "http://127.0.0.1:8000".to_string()
    }

    fn default_listing_path() -> String {
        "/gestion_des_livres".to_string()
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            listing_path: Self::default_listing_path(),
            request_timeout_ms: None,
        }
    }
}

/// User-facing and diagnostic texts shown by the handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSettings {
    #[serde(default = "MessageSettings::default_delete_confirm")]
    pub delete_confirm: String,
    #[serde(default = "MessageSettings::default_delete_failed")]
    pub delete_failed: String,
    #[serde(default = "MessageSettings::default_update_failed")]
    pub update_failed: String,
}

impl MessageSettings {
    fn default_delete_confirm() -> String {
        "Êtes-vous sûr de vouloir supprimer ce livre ?".to_string()
    }

    fn default_delete_failed() -> String {
        "Erreur lors de la suppression du livre".to_string()
    }

    fn default_update_failed() -> String {
        "Erreur lors de la mise à jour du livre".to_string()
    }
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            delete_confirm: Self::default_delete_confirm(),
            delete_failed: Self::default_delete_failed(),
            update_failed: Self::default_update_failed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
