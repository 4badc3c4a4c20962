use std::path::Path;

use crate::error::{AckError, Result};
use crate::models::ProjectManifest;

/// Parse the project `package.json` for `productName` and runtime `dependencies`.
///
/// `devDependencies` are not shipped with the product and are not read.
pub fn read_manifest(path: &Path) -> Result<ProjectManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| AckError::filesystem(path, e))?;
    let manifest: ProjectManifest =
        serde_json::from_str(&content).map_err(|e| AckError::parse(path, e))?;
    tracing::debug!(
        path = %path.display(),
        dependencies = manifest.dependencies.len(),
        "read project manifest"
    );
    Ok(manifest)
}
