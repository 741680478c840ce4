//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::manifest::TextBundle;
use crate::config::overlay::ConfigOverlay;
use crate::config::scanner::scan;
use crate::config::schema::Config;
use crate::config::secrets::{resolve_secrets, ResolvedSecrets, SecretError};
use crate::config::validation::{validate_config, ValidationErrors};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ConfigError {
    /// The rule violations, when the config loaded but is invalid.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ConfigError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Paths a load reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    /// Plain config or manifest stream.
    pub config_file: PathBuf,
    /// Directory with the policy secret files.
    pub policy_secret_dir: Option<PathBuf>,
    /// Directory holding the analytics service account, or the file itself.
    pub analytics_credentials: Option<PathBuf>,
}

impl ConfigSources {
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            policy_secret_dir: None,
            analytics_credentials: None,
        }
    }

    pub fn with_policy_secret_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.policy_secret_dir = Some(dir.into());
        self
    }

    pub fn with_analytics_credentials(mut self, path: impl Into<PathBuf>) -> Self {
        self.analytics_credentials = Some(path.into());
        self
    }
}

/// Assemble a config from defaults, primary bodies and resolved secrets.
///
/// `primary` is applied first, then each text bundle's embedded body in
/// document order. Secrets overwrite their fields last.
pub fn merge(
    primary: Option<ConfigOverlay>,
    text_bundles: &[TextBundle],
    secrets: ResolvedSecrets,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(overlay) = primary {
        overlay.apply(&mut config);
    }

    for bundle in text_bundles {
        let Some(body) = bundle.config_body() else {
            tracing::debug!(name = %bundle.metadata.name, "text bundle carries no config body");
            continue;
        };
        ConfigOverlay::from_yaml(body)
            .map_err(|source| ConfigError::Parse {
                context: format!("config embedded in {:?}", bundle.metadata.name),
                source,
            })?
            .apply(&mut config);
        config.global.namespace = bundle.metadata.namespace.clone();
    }

    if let Some(policy) = secrets.policy {
        config.tenant.private_key = Some(policy.private_key);
        config.tenant.private_key_id = policy.key_id;
        config.tenant.jwks = Some(policy.jwks);
    }
    if let Some(credentials) = secrets.service_account {
        config.analytics.credentials = Some(credentials);
    }

    Ok(config)
}

/// Load, merge and validate configuration.
pub fn load_config(sources: &ConfigSources) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(&sources.config_file).map_err(|source| ConfigError::Io {
        path: sources.config_file.clone(),
        source,
    })?;

    let scanned = scan(&content)?;
    let secrets = resolve_secrets(
        &scanned.secret_bundles,
        sources.policy_secret_dir.as_deref(),
        sources.analytics_credentials.as_deref(),
    )?;
    let config = merge(
        scanned.primary,
        &scanned.text_bundles,
        secrets,
    )?;

    tracing::info!(
        path = %sources.config_file.display(),
        org = %config.tenant.org_name,
        env = %config.tenant.env_name,
        platform = %config.platform(),
        policy_secret = config.tenant.private_key.is_some(),
        service_account = config.analytics.credentials.is_some(),
        "configuration loaded"
    );

    validate_config(&config)?;
    Ok(config)
}

impl Config {
    /// Load from `config_file` with optional secret locations.
    pub fn load(
        config_file: &Path,
        policy_secret_dir: Option<&Path>,
        analytics_credentials: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let mut sources = ConfigSources::new(config_file);
        sources.policy_secret_dir = policy_secret_dir.map(Path::to_path_buf);
        sources.analytics_credentials = analytics_credentials.map(Path::to_path_buf);
        load_config(&sources)
    }
}
