//! Deployment platform detection.
//!
//! The platform is never configured directly; it follows from which
//! internal API the tenant points at.

use std::fmt;

use crate::config::schema::Config;

/// Internal API base of the legacy Apigee-managed SaaS.
pub const LEGACY_SAAS_INTERNAL_BASE: &str = "https://istioservices.apigee.net/edgemicro";

/// Management API base of GCP-managed installs.
pub const GCP_EXPERIENCE_BASE: &str = "https://apigee.googleapis.com";

/// Where the remote service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Self-managed install with a custom internal API.
    Opdk,
    /// Apigee-managed legacy SaaS.
    LegacySaas,
    /// GCP-managed (hybrid or cloud); no internal API.
    GcpManaged,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Opdk => "opdk",
            Platform::LegacySaas => "legacy-saas",
            Platform::GcpManaged => "gcp-managed",
        };
        f.write_str(name)
    }
}

/// Classify the deployment target of `config`.
pub fn detect_platform(config: &Config) -> Platform {
    let internal_api = config.tenant.internal_api.as_str();
    if internal_api.is_empty() {
        Platform::GcpManaged
    } else if internal_api == LEGACY_SAAS_INTERNAL_BASE {
        Platform::LegacySaas
    } else {
        Platform::Opdk
    }
}

impl Config {
    pub fn platform(&self) -> Platform {
        detect_platform(self)
    }

    pub fn is_gcp_managed(&self) -> bool {
        self.platform() == Platform::GcpManaged
    }

    /// True for the Apigee-managed legacy SaaS.
    pub fn is_apigee_managed(&self) -> bool {
        self.platform() == Platform::LegacySaas
    }

    pub fn is_opdk(&self) -> bool {
        self.platform() == Platform::Opdk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_detect() {
        let mut config = Config::default();
        config.tenant.internal_api = "https://custom.example/edgemicro".into();
        assert_eq!(config.platform(), Platform::Opdk);
        assert!(config.is_opdk());
        assert!(!config.is_apigee_managed());
        assert!(!config.is_gcp_managed());

        config.tenant.internal_api = LEGACY_SAAS_INTERNAL_BASE.into();
        assert_eq!(config.platform(), Platform::LegacySaas);
        assert!(config.is_apigee_managed());
        assert!(!config.is_opdk());
        assert!(!config.is_gcp_managed());

        config.tenant.internal_api.clear();
        assert_eq!(config.platform(), Platform::GcpManaged);
        assert!(config.is_gcp_managed());
        assert!(!config.is_apigee_managed());
        assert!(!config.is_opdk());
    }

    #[test]
    fn test_gcp_base_is_not_special() {
        let mut config = Config::default();
        config.tenant.internal_api = GCP_EXPERIENCE_BASE.into();
        assert_eq!(detect_platform(&config), Platform::Opdk);
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::LegacySaas.to_string(), "legacy-saas");
        assert_eq!(Platform::GcpManaged.to_string(), "gcp-managed");
    }
}
