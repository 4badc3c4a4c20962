use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AckError, Result};

/// Generator configuration, deserialized from `.acknowledgr/config.toml`.
///
/// Every key is optional; missing keys take the values of [`Config::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Destination file, relative to the project root.
    pub output: PathBuf,
    /// Installed dependency tree, relative to the project root.
    pub modules_dir: PathBuf,
    /// Product name used when `package.json` has no `productName`.
    pub default_product_name: String,
    /// Holder named in the copyright header comment.
    pub copyright_holder: String,
    /// First year of the copyright range.
    pub copyright_start_year: i32,
    /// Identifier written to the `SPDX-License-Identifier` header line.
    pub spdx_identifier: String,
    /// Dependencies left out of the document.
    pub skip: BTreeSet<String>,
    /// Fixed license text for dependencies that ship no discoverable license.
    pub overrides: BTreeMap<String, String>,
    /// Maximum number of license resolutions in flight.
    pub concurrency: usize,
    /// Time budget for a single license resolution, in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let mut overrides = BTreeMap::new();
        // fs-xattr publishes no license file and no `license` field.
        overrides.insert("fs-xattr".to_string(), "License: MIT".to_string());

        Config {
            output: PathBuf::from("ACKNOWLEDGMENTS.md"),
            modules_dir: PathBuf::from("node_modules"),
            default_product_name: "de arco".to_string(),
            copyright_holder: "de arco".to_string(),
            copyright_start_year: 2021,
            spdx_identifier: "WTFPL".to_string(),
            skip: BTreeSet::new(),
            overrides,
            concurrency: 100,
            timeout_secs: 120,
        }
    }
}

impl Config {
    fn validate(self, path: &Path) -> Result<Self> {
        if self.concurrency == 0 {
            return Err(AckError::Config {
                path: path.to_path_buf(),
                message: "concurrency must be at least 1".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(AckError::Config {
                path: path.to_path_buf(),
                message: "timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.acknowledgr/config.toml`
/// 3. `~/.config/acknowledgr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".acknowledgr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("acknowledgr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content =
        std::fs::read_to_string(path).map_err(|e| AckError::filesystem(path, e))?;
    let config: Config = toml::from_str(&content).map_err(|e| AckError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    config.validate(path)
}
