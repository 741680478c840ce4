//! Partial configuration overlays.
//!
//! A primary body is parsed into a [`ConfigOverlay`] whose fields are all
//! optional, then applied field by field onto an existing [`Config`]. Only
//! fields present in the document are written, so a body naming just
//! `tenant.org_name` leaves every other default in place. A present field
//! always wins, even when its value is empty or zero.

use std::time::Duration;

use serde::Deserialize;

use crate::config::duration;
use crate::config::schema::{
    AnalyticsConfig, AuthConfig, Config, GlobalConfig, ProductsConfig, TenantConfig,
    TlsClientConfig, TlsListenerConfig,
};

/// Writes `value` into `target` when present.
fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Top-level overlay, mirroring [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub global: Option<GlobalOverlay>,
    #[serde(default)]
    pub tenant: Option<TenantOverlay>,
    #[serde(default)]
    pub products: Option<ProductsOverlay>,
    #[serde(default)]
    pub analytics: Option<AnalyticsOverlay>,
    #[serde(default)]
    pub auth: Option<AuthOverlay>,
}

impl ConfigOverlay {
    /// Parse a YAML body. Empty and `null` bodies yield an empty overlay.
    pub fn from_yaml(body: &str) -> Result<Self, serde_yaml::Error> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        // Decoded directly so plain scalars like `2024` still fit string fields.
        Ok(serde_yaml::from_str::<Option<Self>>(body)?.unwrap_or_default())
    }

    pub fn apply(self, config: &mut Config) {
        if let Some(global) = self.global {
            global.apply(&mut config.global);
        }
        if let Some(tenant) = self.tenant {
            tenant.apply(&mut config.tenant);
        }
        if let Some(products) = self.products {
            products.apply(&mut config.products);
        }
        if let Some(analytics) = self.analytics {
            analytics.apply(&mut config.analytics);
        }
        if let Some(auth) = self.auth {
            auth.apply(&mut config.auth);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GlobalOverlay {
    #[serde(default)]
    pub temp_dir: Option<String>,
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub keep_alive_max_connection_age: Option<Duration>,
    #[serde(default)]
    pub api_address: Option<String>,
    #[serde(default)]
    pub metrics_address: Option<String>,
    #[serde(default)]
    pub tls: Option<TlsListenerOverlay>,
}

impl GlobalOverlay {
    fn apply(self, global: &mut GlobalConfig) {
        set(&mut global.temp_dir, self.temp_dir);
        set(
            &mut global.keep_alive_max_connection_age,
            self.keep_alive_max_connection_age,
        );
        set(&mut global.api_address, self.api_address);
        set(&mut global.metrics_address, self.metrics_address);
        if let Some(tls) = self.tls {
            tls.apply(&mut global.tls);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TlsListenerOverlay {
    #[serde(default)]
    pub cert_file: Option<String>,
    #[serde(default)]
    pub key_file: Option<String>,
}

impl TlsListenerOverlay {
    fn apply(self, tls: &mut TlsListenerConfig) {
        set(&mut tls.cert_file, self.cert_file);
        set(&mut tls.key_file, self.key_file);
    }
}

/// Tenant overlay. Secret-derived fields have no overlay counterpart and
/// can only be filled by the secret resolver.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TenantOverlay {
    #[serde(default)]
    pub internal_api: Option<String>,
    #[serde(default)]
    pub remote_service_api: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub env_name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub client_timeout: Option<Duration>,
    #[serde(default)]
    pub allow_unverified_ssl_cert: Option<bool>,
}

impl TenantOverlay {
    fn apply(self, tenant: &mut TenantConfig) {
        set(&mut tenant.internal_api, self.internal_api);
        set(&mut tenant.remote_service_api, self.remote_service_api);
        set(&mut tenant.org_name, self.org_name);
        set(&mut tenant.env_name, self.env_name);
        set(&mut tenant.key, self.key);
        set(&mut tenant.secret, self.secret);
        set(&mut tenant.client_timeout, self.client_timeout);
        set(
            &mut tenant.allow_unverified_ssl_cert,
            self.allow_unverified_ssl_cert,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductsOverlay {
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub refresh_rate: Option<Duration>,
}

impl ProductsOverlay {
    fn apply(self, products: &mut ProductsConfig) {
        set(&mut products.refresh_rate, self.refresh_rate);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyticsOverlay {
    #[serde(default)]
    pub legacy_endpoint: Option<bool>,
    #[serde(default)]
    pub file_limit: Option<usize>,
    #[serde(default)]
    pub send_channel_size: Option<usize>,
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub collection_interval: Option<Duration>,
    #[serde(default)]
    pub fluentd_endpoint: Option<String>,
    #[serde(default)]
    pub tls: Option<TlsClientOverlay>,
}

impl AnalyticsOverlay {
    fn apply(self, analytics: &mut AnalyticsConfig) {
        set(&mut analytics.legacy_endpoint, self.legacy_endpoint);
        set(&mut analytics.file_limit, self.file_limit);
        set(&mut analytics.send_channel_size, self.send_channel_size);
        set(&mut analytics.collection_interval, self.collection_interval);
        set(&mut analytics.fluentd_endpoint, self.fluentd_endpoint);
        if let Some(tls) = self.tls {
            tls.apply(&mut analytics.tls);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TlsClientOverlay {
    #[serde(default)]
    pub ca_file: Option<String>,
    #[serde(default)]
    pub cert_file: Option<String>,
    #[serde(default)]
    pub key_file: Option<String>,
    #[serde(default)]
    pub allow_unverified_ssl_cert: Option<bool>,
}

impl TlsClientOverlay {
    fn apply(self, tls: &mut TlsClientConfig) {
        set(&mut tls.ca_file, self.ca_file);
        set(&mut tls.cert_file, self.cert_file);
        set(&mut tls.key_file, self.key_file);
        set(
            &mut tls.allow_unverified_ssl_cert,
            self.allow_unverified_ssl_cert,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthOverlay {
    #[serde(default)]
    pub api_key_claim: Option<String>,
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub api_key_cache_duration: Option<Duration>,
    #[serde(default)]
    pub api_key_header: Option<String>,
    #[serde(default)]
    pub target_header: Option<String>,
    #[serde(default)]
    pub reject_unauthorized: Option<bool>,
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub jwks_poll_interval: Option<Duration>,
}

impl AuthOverlay {
    fn apply(self, auth: &mut AuthConfig) {
        set(&mut auth.api_key_claim, self.api_key_claim);
        set(&mut auth.api_key_cache_duration, self.api_key_cache_duration);
        set(&mut auth.api_key_header, self.api_key_header);
        set(&mut auth.target_header, self.target_header);
        set(&mut auth.reject_unauthorized, self.reject_unauthorized);
        set(&mut auth.jwks_poll_interval, self.jwks_poll_interval);
    }
}
