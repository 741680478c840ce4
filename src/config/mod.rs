//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (plain YAML or manifest stream)
//!     → scanner.rs (split documents, classify ConfigMap / Secret)
//!     → secrets.rs (policy secret + service account, bundle or path)
//!     → loader.rs::merge (defaults ← overlay.rs bodies ← secrets)
//!     → platform.rs (classify deployment, logged)
//!     → validation.rs (every rule, ordered)
//!     → Config (validated, owned by the caller)
//! ```
//!
//! # Design Decisions
//! - Config is built fresh per load; nothing is cached between loads
//! - All fields have defaults to allow minimal configs
//! - Parse and secret errors abort the load; validation reports everything

pub mod duration;
pub mod loader;
pub mod manifest;
pub mod overlay;
pub mod platform;
pub mod properties;
pub mod scanner;
pub mod schema;
pub mod secrets;
pub mod validation;

pub use loader::{load_config, merge, ConfigError, ConfigSources};
pub use manifest::{ManifestRecord, Metadata, SecretBundle, TextBundle};
pub use platform::{detect_platform, Platform, GCP_EXPERIENCE_BASE, LEGACY_SAAS_INTERNAL_BASE};
pub use scanner::{scan, ScannedConfig};
pub use schema::{
    AnalyticsConfig, AuthConfig, Config, CredentialsOrigin, GlobalConfig, ProductsConfig,
    ServiceAccountCredentials, TenantConfig, TlsClientConfig, TlsListenerConfig,
};
pub use secrets::{resolve_secrets, PolicySecret, ResolvedSecrets, SecretError};
pub use validation::{validate_config, ValidationError, ValidationErrors};
