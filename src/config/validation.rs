//! Configuration validation.
//!
//! # Responsibilities
//! - Check required tenant fields
//! - Check that TLS options are configured as complete groups
//!
//! # Design Decisions
//! - Every rule runs; all violations are returned together
//! - Violations are reported in a fixed rule order
//! - Validation is a pure function: `&Config → Result<(), ValidationErrors>`

use std::fmt;

use thiserror::Error;

use crate::config::schema::Config;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("tenant.internal_api or tenant.analytics.fluentd_endpoint is required if no service account")]
    AnalyticsTargetRequired,

    #[error("global.tls.cert_file and global.tls.key_file are both required if either are present")]
    IncompleteListenerTls,

    #[error("all analytics.tls options are required if any are present")]
    IncompleteAnalyticsTls,
}

/// Ordered collection of every rule violation found in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            1 => write!(f, "1 error occurred:")?,
            n => write!(f, "{n} errors occurred:")?,
        }
        for error in &self.errors {
            write!(f, "\n\t* {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Run every rule against `config`.
pub fn validate_config(config: &Config) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let tenant = &config.tenant;
    let analytics = &config.analytics;

    if tenant.remote_service_api.is_empty() {
        errors.push(ValidationError::Required("tenant.remote_service_api"));
    }
    if tenant.internal_api.is_empty()
        && analytics.fluentd_endpoint.is_empty()
        && analytics.credentials.is_none()
    {
        errors.push(ValidationError::AnalyticsTargetRequired);
    }
    if tenant.org_name.is_empty() {
        errors.push(ValidationError::Required("tenant.org_name"));
    }
    if tenant.env_name.is_empty() {
        errors.push(ValidationError::Required("tenant.env_name"));
    }

    let listener_tls = &config.global.tls;
    if listener_tls.cert_file.is_empty() != listener_tls.key_file.is_empty() {
        errors.push(ValidationError::IncompleteListenerTls);
    }

    let files = analytics.tls.configured_files();
    if files > 0 && files < 3 {
        errors.push(ValidationError::IncompleteAnalyticsTls);
    }

    errors.into_result()
}

impl Config {
    /// See [`validate_config`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_config(self)
    }
}
