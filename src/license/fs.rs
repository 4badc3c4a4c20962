use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Read-only access to an installed dependency tree.
#[async_trait]
pub trait PackageFs: Send + Sync {
    /// Names of the regular files directly inside `dir`, in no particular order.
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Read a UTF-8 file.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`PackageFs`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl PackageFs for LocalFs {
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks, so linked license files still count. Entries
            // whose metadata can't be read are kept so reading them fails loudly.
            let is_file = match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) => metadata.is_file(),
                Err(_) => true,
            };
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("LICENSE"), "MIT").unwrap();
        std::fs::write(dir.path().join("index.js"), "").unwrap();
        std::fs::create_dir(dir.path().join("licenses")).unwrap();

        let mut names = LocalFs.list_files(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["LICENSE", "index.js"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_entries_are_listed() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("LICENSE")).unwrap();

        let names = LocalFs.list_files(dir.path()).await.unwrap();
        assert_eq!(names, vec!["LICENSE"]);
    }

    #[tokio::test]
    async fn test_missing_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFs
            .list_files(&dir.path().join("absent"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
