//! Multi-document scanning.
//!
//! A configuration file is either a plain configuration document (legacy
//! single-file mode) or a stream of manifest records in any order, possibly
//! preceded or followed by a plain document. The scanner classifies every
//! document once and hands typed records to the loader.
//!
//! Documents are decoded straight from the YAML stream into their target
//! types. Going through [`serde_yaml::Value`] first would resolve plain
//! scalars such as `2024` to numbers and reject them for string fields.

use serde::Deserialize;

use crate::config::loader::ConfigError;
use crate::config::manifest::{
    ManifestRecord, SecretBundle, TextBundle, SECRET_BUNDLE_KIND, TEXT_BUNDLE_KIND,
};
use crate::config::overlay::ConfigOverlay;

/// Output of [`scan`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannedConfig {
    /// The first plain (kind-less) document, if any.
    pub primary: Option<ConfigOverlay>,
    /// Text bundles in document order.
    pub text_bundles: Vec<TextBundle>,
    /// Secret bundles in document order.
    pub secret_bundles: Vec<SecretBundle>,
}

impl ScannedConfig {
    pub fn has_manifests(&self) -> bool {
        !self.text_bundles.is_empty() || !self.secret_bundles.is_empty()
    }
}

/// How a document is decoded in the second pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Plain,
    Text,
    Secret,
    Unknown,
}

/// Split `input` into YAML documents and classify them by `kind`.
///
/// The first plain document becomes the primary config; later plain
/// documents are ignored with a warning. Any undecodable document fails the
/// whole scan.
pub fn scan(input: &str) -> Result<ScannedConfig, ConfigError> {
    let kinds = classify(input)?;
    let mut scanned = ScannedConfig::default();

    for (index, (document, kind)) in serde_yaml::Deserializer::from_str(input)
        .zip(kinds.iter().copied())
        .enumerate()
    {
        let number = index + 1;
        match kind {
            DocumentKind::Unknown => continue,
            DocumentKind::Plain => {
                let overlay = Option::<ConfigOverlay>::deserialize(document)
                    .map_err(|source| parse_error(format!("config in document {number}"), source))?;
                let Some(overlay) = overlay else {
                    continue;
                };
                if scanned.primary.is_some() {
                    tracing::warn!(document = number, "ignoring additional plain config document");
                    continue;
                }
                tracing::debug!(document = number, "found plain config document");
                scanned.primary = Some(overlay);
            }
            DocumentKind::Text => {
                let bundle = TextBundle::deserialize(document).map_err(|source| {
                    parse_error(format!("{TEXT_BUNDLE_KIND} manifest in document {number}"), source)
                })?;
                record_found(number, ManifestRecord::Text(bundle), &mut scanned);
            }
            DocumentKind::Secret => {
                let bundle = SecretBundle::deserialize(document).map_err(|source| {
                    parse_error(format!("{SECRET_BUNDLE_KIND} manifest in document {number}"), source)
                })?;
                record_found(number, ManifestRecord::Secret(bundle), &mut scanned);
            }
        }
    }

    tracing::debug!(
        documents = kinds.len(),
        plain = scanned.primary.is_some(),
        text_bundles = scanned.text_bundles.len(),
        secret_bundles = scanned.secret_bundles.len(),
        "scanned config documents"
    );

    Ok(scanned)
}

/// First pass: peek at each document's `kind`.
fn classify(input: &str) -> Result<Vec<DocumentKind>, ConfigError> {
    let mut kinds = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|source| parse_error(format!("document {}", index + 1), source))?;
        let kind = match value.get("kind").and_then(serde_yaml::Value::as_str) {
            None => DocumentKind::Plain,
            Some(TEXT_BUNDLE_KIND) => DocumentKind::Text,
            Some(SECRET_BUNDLE_KIND) => DocumentKind::Secret,
            Some(kind) => {
                tracing::debug!(document = index + 1, kind, "skipping unrecognized manifest kind");
                DocumentKind::Unknown
            }
        };
        kinds.push(kind);
    }
    Ok(kinds)
}

fn record_found(number: usize, record: ManifestRecord, scanned: &mut ScannedConfig) {
    tracing::debug!(
        document = number,
        name = %record.metadata().name,
        "found manifest record"
    );
    match record {
        ManifestRecord::Text(bundle) => scanned.text_bundles.push(bundle),
        ManifestRecord::Secret(bundle) => scanned.secret_bundles.push(bundle),
    }
}

fn parse_error(context: String, source: serde_yaml::Error) -> ConfigError {
    ConfigError::Parse { context, source }
}
