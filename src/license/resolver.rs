use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use serde::Deserialize;
use serde_json::Value;

use super::fs::PackageFs;
use crate::config::Config;
use crate::error::{AckError, Result};
use crate::models::{trim_text, LicenseRecord, LicenseSource};

/// The `license` field of a dependency's own `package.json`.
#[derive(Debug, Deserialize)]
struct PackageLicense {
    license: Option<Value>,
}

/// Resolves license text for installed dependencies.
pub struct Resolver<F> {
    fs: F,
    modules_dir: PathBuf,
    overrides: BTreeMap<String, String>,
    concurrency: usize,
    timeout: Duration,
}

impl<F: PackageFs> Resolver<F> {
    pub fn new(fs: F, modules_dir: PathBuf) -> Self {
        let defaults = Config::default();
        Self {
            fs,
            modules_dir,
            overrides: defaults.overrides,
            concurrency: defaults.concurrency,
            timeout: Duration::from_secs(defaults.timeout_secs),
        }
    }

    /// Build a resolver for the project at `root` using `config`'s tree
    /// location, override table, concurrency cap and timeout.
    pub fn from_config(fs: F, root: &Path, config: &Config) -> Self {
        Self::new(fs, root.join(&config.modules_dir))
            .with_overrides(config.overrides.clone())
            .with_concurrency(config.concurrency)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve one dependency, trying in order:
    ///
    /// 1. the override table
    /// 2. the first file (by name) directly under the package directory whose
    ///    name starts with `license` or `licence`, case-insensitively
    /// 3. the `license` identifier in the package's `package.json`
    pub async fn resolve_license(&self, name: &str) -> Result<LicenseRecord> {
        if let Some(text) = self.overrides.get(name) {
            tracing::debug!(dependency = name, "using license override");
            return Ok(LicenseRecord {
                name: name.to_string(),
                text: trim_text(text).to_string(),
                source: LicenseSource::Override,
            });
        }

        let package_dir = self.modules_dir.join(name);
        let mut files = self
            .fs
            .list_files(&package_dir)
            .await
            .map_err(|e| AckError::filesystem(&package_dir, e))?;
        // Directory order is platform-dependent; sort so reruns pick the same file.
        files.sort();

        if let Some(file) = files.into_iter().find(|f| is_license_file(f)) {
            let path = package_dir.join(&file);
            let text = self
                .fs
                .read_to_string(&path)
                .await
                .map_err(|e| AckError::filesystem(&path, e))?;
            tracing::debug!(dependency = name, file = %file, "found license file");
            return Ok(LicenseRecord {
                name: name.to_string(),
                text: trim_text(&text).to_string(),
                source: LicenseSource::LicenseFile(file),
            });
        }

        let manifest_path = package_dir.join("package.json");
        let content = self
            .fs
            .read_to_string(&manifest_path)
            .await
            .map_err(|e| AckError::filesystem(&manifest_path, e))?;
        let manifest: PackageLicense =
            serde_json::from_str(&content).map_err(|e| AckError::parse(&manifest_path, e))?;

        match manifest.license.as_ref().and_then(license_identifier) {
            Some(id) => {
                tracing::debug!(dependency = name, license = id, "using declared license");
                Ok(LicenseRecord::from_identifier(name, id))
            }
            None => Err(AckError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Resolve every name with at most `concurrency` resolutions in flight.
    ///
    /// Records come back in the order of `names`. The first failure or
    /// timeout aborts the batch and drops whatever is still running. The
    /// timeout applies to each resolution, not to the batch as a whole.
    pub async fn resolve_all(
        &self,
        names: &[String],
        progress: Option<&ProgressBar>,
    ) -> Result<Vec<LicenseRecord>> {
        stream::iter(names)
            .map(|name| async move {
                let record = tokio::time::timeout(self.timeout, self.resolve_license(name))
                    .await
                    .map_err(|_| AckError::Timeout {
                        name: name.clone(),
                        timeout: self.timeout,
                    })??;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                Ok::<_, AckError>(record)
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}

/// `LICENSE`, `License.md`, `licence.txt`, `LICENSE-MIT`, ...
pub fn is_license_file(file_name: &str) -> bool {
    file_name.get(..7).is_some_and(|prefix| {
        prefix.eq_ignore_ascii_case("license") || prefix.eq_ignore_ascii_case("licence")
    })
}

/// A usable identifier from a `license` field: a non-blank string, or the
/// `type` of the legacy `{ "type": ..., "url": ... }` object form.
fn license_identifier(value: &Value) -> Option<&str> {
    let id = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("type")?.as_str()?,
        _ => return None,
    };
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}
