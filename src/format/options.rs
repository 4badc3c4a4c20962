use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AckError, Result};

/// Config files checked in each directory, in order. `package.json` only
/// counts when it has a `prettier` key.
const CONFIG_FILES: &[&str] = &[
    "package.json",
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.toml",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProseWrap {
    Always,
    Never,
    #[default]
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    #[default]
    Lf,
    Crlf,
    Cr,
    /// Treated as `lf`; the output is always written fresh.
    Auto,
}

impl EndOfLine {
    pub fn as_str(self) -> &'static str {
        match self {
            EndOfLine::Lf | EndOfLine::Auto => "\n",
            EndOfLine::Crlf => "\r\n",
            EndOfLine::Cr => "\r",
        }
    }
}

/// Formatting options for Markdown output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub print_width: usize,
    pub prose_wrap: ProseWrap,
    pub end_of_line: EndOfLine,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            prose_wrap: ProseWrap::Preserve,
            end_of_line: EndOfLine::Lf,
        }
    }
}

/// The recognised subset of a Prettier configuration. Other keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    print_width: Option<usize>,
    prose_wrap: Option<ProseWrap>,
    end_of_line: Option<EndOfLine>,
}

impl RawOptions {
    fn into_options(self, path: &Path) -> Result<FormatOptions> {
        let defaults = FormatOptions::default();
        let print_width = self.print_width.unwrap_or(defaults.print_width);
        if print_width == 0 {
            return Err(AckError::Formatting(format!(
                "printWidth must be positive in {}",
                path.display()
            )));
        }
        Ok(FormatOptions {
            print_width,
            prose_wrap: self.prose_wrap.unwrap_or(defaults.prose_wrap),
            end_of_line: self.end_of_line.unwrap_or(defaults.end_of_line),
        })
    }
}

/// Find the formatting configuration that applies to `destination`.
///
/// Walks up from the destination's directory; the first directory holding a
/// config wins. Without one, [`FormatOptions::default`] applies.
pub fn resolve_options(destination: &Path) -> Result<FormatOptions> {
    let start = destination.parent().unwrap_or(Path::new("."));

    for dir in start.ancestors() {
        for file in CONFIG_FILES {
            let path = dir.join(file);
            if !path.is_file() {
                continue;
            }
            if let Some(raw) = read_options(&path)? {
                tracing::debug!(path = %path.display(), "using formatting configuration");
                return raw.into_options(&path);
            }
        }
    }

    tracing::debug!("no formatting configuration found, using defaults");
    Ok(FormatOptions::default())
}

fn read_options(path: &Path) -> Result<Option<RawOptions>> {
    let content = std::fs::read_to_string(path).map_err(|e| AckError::filesystem(path, e))?;
    let malformed = |e: &dyn std::fmt::Display| {
        AckError::Formatting(format!("malformed configuration {}: {}", path.display(), e))
    };

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let raw = match file_name {
        "package.json" => {
            let json: Value = serde_json::from_str(&content).map_err(|e| malformed(&e))?;
            match json.get("prettier") {
                Some(Value::Object(_)) => {
                    let value = json["prettier"].clone();
                    serde_json::from_value(value).map_err(|e| malformed(&e))?
                }
                Some(Value::String(shared)) => {
                    // Shared configs are npm modules; their options can't be read here.
                    tracing::warn!(config = %shared, "ignoring shared prettier configuration");
                    RawOptions::default()
                }
                Some(_) => return Err(malformed(&"`prettier` must be an object")),
                None => return Ok(None),
            }
        }
        ".prettierrc.json" => serde_json::from_str(&content).map_err(|e| malformed(&e))?,
        ".prettierrc.toml" => toml::from_str(&content).map_err(|e| malformed(&e))?,
        // `.prettierrc` may hold JSON or YAML; YAML accepts both.
        _ => serde_yaml::from_str(&content).map_err(|e| malformed(&e))?,
    };
    Ok(Some(raw))
}
