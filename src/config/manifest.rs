//! Kubernetes-style manifest records that may carry configuration and
//! secrets alongside (or instead of) a plain configuration document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of the record embedding the configuration body.
pub const TEXT_BUNDLE_KIND: &str = "ConfigMap";

/// Kind of records carrying base64-encoded secrets.
pub const SECRET_BUNDLE_KIND: &str = "Secret";

/// Text bundle data key holding the embedded configuration body.
pub const CONFIG_DATA_KEY: &str = "config.yaml";

/// Identity shared by every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
}

/// A recognized manifest record, discriminated by its `kind` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ManifestRecord {
    #[serde(rename = "ConfigMap")]
    Text(TextBundle),
    #[serde(rename = "Secret")]
    Secret(SecretBundle),
}

impl ManifestRecord {
    pub fn metadata(&self) -> &Metadata {
        match self {
            ManifestRecord::Text(bundle) => &bundle.metadata,
            ManifestRecord::Secret(bundle) => &bundle.metadata,
        }
    }
}

/// Plain key-value bundle (`ConfigMap`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBundle {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl TextBundle {
    /// The embedded configuration body, if this bundle carries one.
    pub fn config_body(&self) -> Option<&str> {
        self.data.get(CONFIG_DATA_KEY).map(String::as_str)
    }
}

/// Key-value bundle whose values are base64-encoded (`Secret`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretBundle {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    /// Opaque classification, e.g. `Opaque`. Never inspected.
    #[serde(rename = "type", default)]
    pub secret_type: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl SecretBundle {
    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.data.contains_key(*key))
    }
}
