//! Minimal `key=value` properties format used by the policy secret.

use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;

/// A line that is neither blank, a comment, nor `key=value`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: expected key=value, got {content:?}")]
pub struct PropertiesError {
    pub line: usize,
    pub content: String,
}

/// Parse properties text. Lines starting with `#` or `!` are comments.
pub fn read_properties(text: &str) -> Result<BTreeMap<String, String>, PropertiesError> {
    let mut props = BTreeMap::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(PropertiesError {
                line: index + 1,
                content: line.to_string(),
            });
        };
        props.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(props)
}

/// Write properties as sorted `key=value` lines.
pub fn write_properties<W: Write>(mut writer: W, props: &BTreeMap<String, String>) -> io::Result<()> {
    for (key, value) in props {
        writeln!(writer, "{key}={value}")?;
    }
    Ok(())
}
