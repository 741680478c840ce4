//! Configuration schema definitions.
//!
//! This module defines the fully-merged configuration consumed by the
//! policy, auth and analytics clients. Every section carries documented
//! defaults; input documents only ever override fields they mention
//! (see [`crate::config::overlay`]).

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::config::duration;

/// Root configuration for the remote service proxy.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct Config {
    /// Process-wide settings (listeners, temp dir, TLS).
    pub global: GlobalConfig,

    /// Remote service tenant settings and policy secret material.
    pub tenant: TenantConfig,

    /// API product cache settings.
    pub products: ProductsConfig,

    /// Analytics collection settings.
    pub analytics: AnalyticsConfig,

    /// API key and JWT authentication settings.
    pub auth: AuthConfig,
}

/// Global process configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GlobalConfig {
    /// Scratch directory for analytics buffering.
    pub temp_dir: String,

    /// Maximum age of a keep-alive connection.
    #[serde(with = "duration")]
    pub keep_alive_max_connection_age: Duration,

    /// Listen address of the policy API.
    pub api_address: String,

    /// Listen address of the metrics endpoint.
    pub metrics_address: String,

    /// Listener TLS, both files or neither.
    pub tls: TlsListenerConfig,

    /// Namespace of the manifest the configuration was embedded in.
    #[serde(skip)]
    pub namespace: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/apigee-istio".to_string(),
            keep_alive_max_connection_age: Duration::from_secs(60),
            api_address: ":5000".to_string(),
            metrics_address: ":5001".to_string(),
            tls: TlsListenerConfig::default(),
            namespace: String::new(),
        }
    }
}

/// TLS material for the local listeners.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct TlsListenerConfig {
    /// Path to certificate file (PEM).
    pub cert_file: String,

    /// Path to private key file (PEM).
    pub key_file: String,
}

impl TlsListenerConfig {
    /// True when either file is configured.
    pub fn is_configured(&self) -> bool {
        !self.cert_file.is_empty() || !self.key_file.is_empty()
    }
}

/// Tenant configuration for the remote service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TenantConfig {
    /// Base URL of the internal API. Empty on GCP-managed installs.
    pub internal_api: String,

    /// Base URL of the remote-service proxy deployed to the tenant.
    pub remote_service_api: String,

    pub org_name: String,

    pub env_name: String,

    /// Remote service key.
    pub key: String,

    /// Remote service secret.
    #[serde(skip_serializing)]
    pub secret: String,

    /// Timeout applied to every outbound client request.
    #[serde(with = "duration")]
    pub client_timeout: Duration,

    /// Skip certificate verification on outbound requests.
    pub allow_unverified_ssl_cert: bool,

    /// PEM-encoded RSA private key used to sign tokens.
    #[serde(skip)]
    pub private_key: Option<Vec<u8>>,

    /// Key ID published alongside the private key. Empty when no complete
    /// policy secret was resolved.
    #[serde(skip)]
    pub private_key_id: String,

    /// Raw JWKS document.
    #[serde(skip)]
    pub jwks: Option<Vec<u8>>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            internal_api: String::new(),
            remote_service_api: String::new(),
            org_name: String::new(),
            env_name: String::new(),
            key: String::new(),
            secret: String::new(),
            client_timeout: Duration::from_secs(30),
            allow_unverified_ssl_cert: false,
            private_key: None,
            private_key_id: String::new(),
            jwks: None,
        }
    }
}

/// API product cache configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductsConfig {
    /// How often the product list is refreshed.
    #[serde(with = "duration")]
    pub refresh_rate: Duration,
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            refresh_rate: Duration::from_secs(2 * 60),
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Use the legacy analytics upload endpoint.
    pub legacy_endpoint: bool,

    /// Maximum number of buffered analytics files.
    pub file_limit: usize,

    /// Capacity of the record send channel.
    pub send_channel_size: usize,

    /// Interval between analytics uploads.
    #[serde(with = "duration")]
    pub collection_interval: Duration,

    /// Address of the fluentd-style collector (hybrid installs).
    pub fluentd_endpoint: String,

    /// Client TLS for the collector, all files or none.
    pub tls: TlsClientConfig,

    /// Service account resolved from the analytics secret.
    #[serde(skip)]
    pub credentials: Option<ServiceAccountCredentials>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            legacy_endpoint: false,
            file_limit: 1024,
            send_channel_size: 10,
            collection_interval: Duration::from_secs(10),
            fluentd_endpoint: String::new(),
            tls: TlsClientConfig::default(),
            credentials: None,
        }
    }
}

/// Client TLS material for the analytics collector.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct TlsClientConfig {
    pub ca_file: String,
    pub cert_file: String,
    pub key_file: String,
    pub allow_unverified_ssl_cert: bool,
}

impl TlsClientConfig {
    /// Number of file options set. The unverified flag does not count.
    pub fn configured_files(&self) -> usize {
        [&self.ca_file, &self.cert_file, &self.key_file]
            .iter()
            .filter(|f| !f.is_empty())
            .count()
    }
}

/// Where a service account credential was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsOrigin {
    /// Read from a file on disk.
    File(PathBuf),
    /// Decoded from the named secret manifest.
    Manifest(String),
}

/// An opaque service account credential. The JSON is not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountCredentials {
    pub origin: CredentialsOrigin,
    pub json: Vec<u8>,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthConfig {
    /// JWT claim that carries an API key.
    pub api_key_claim: String,

    /// How long verified API keys are cached.
    #[serde(with = "duration")]
    pub api_key_cache_duration: Duration,

    /// Request header that carries an API key.
    pub api_key_header: String,

    /// Request header that identifies the target.
    pub target_header: String,

    /// Reject requests when the remote service is unreachable.
    pub reject_unauthorized: bool,

    /// JWKS refresh interval. Zero disables polling.
    #[serde(with = "duration")]
    pub jwks_poll_interval: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key_claim: String::new(),
            api_key_cache_duration: Duration::from_secs(30 * 60),
            api_key_header: "x-api-key".to_string(),
            target_header: ":authority".to_string(),
            reject_unauthorized: false,
            jwks_poll_interval: Duration::ZERO,
        }
    }
}
