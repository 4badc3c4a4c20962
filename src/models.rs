use std::collections::BTreeMap;

use serde::Deserialize;

/// The subset of a project `package.json` the generator reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectManifest {
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Trim whitespace and byte-order marks from both ends of `text`.
///
/// License files saved by Windows editors often start with U+FEFF, which
/// `str::trim` keeps.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Resolved license text for one dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseRecord {
    pub name: String,
    pub text: String,
    pub source: LicenseSource,
}

impl LicenseRecord {
    /// Build a record from a declared license identifier (`License: <id>`).
    pub fn from_identifier(name: &str, identifier: &str) -> Self {
        Self {
            name: name.to_string(),
            text: format!("License: {}", identifier),
            source: LicenseSource::Manifest(identifier.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LicenseSource {
    /// Fixed text from the configured override table.
    Override,
    /// A bundled license file, by file name.
    LicenseFile(String),
    /// The `license` identifier of the dependency's own `package.json`.
    Manifest(String),
}

impl std::fmt::Display for LicenseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseSource::Override => write!(f, "override"),
            LicenseSource::LicenseFile(file) => write!(f, "file ({})", file),
            LicenseSource::Manifest(id) => write!(f, "package.json ({})", id),
        }
    }
}
