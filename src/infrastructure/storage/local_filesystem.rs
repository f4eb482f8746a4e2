use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::domain::repositories::{Filesystem, MkdirMode};
use crate::error::RegistrarError;

/// Maps a storage path onto a path below `root`.
///
/// # Errors
///
/// Returns [`RegistrarError::Storage`] for empty paths and for paths with
/// `..` or prefix components.
pub fn resolve_storage_path(root: &Path, storage_path: &str) -> Result<PathBuf, RegistrarError> {
    let trimmed = storage_path.trim();
    if trimmed.trim_matches('/').is_empty() {
        return Err(RegistrarError::storage("Storage path must not be empty"));
    }

    let mut resolved = root.to_path_buf();
    for component in Path::new(trimmed).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir | Component::Prefix(_) => {
                return Err(RegistrarError::storage(format!(
                    "Invalid storage path: {storage_path}"
                )));
            }
        }
    }

    Ok(resolved)
}

/// [`Filesystem`] over a directory tree on local disk.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn mkdir(&self, path: &str, _mode: MkdirMode) -> Result<String, RegistrarError> {
        let disk_path = resolve_storage_path(&self.root, path)?;

        match tokio::fs::metadata(&disk_path).await {
            Ok(meta) if meta.is_dir() => {
                tracing::debug!(path, "Reusing existing directory");
                return Ok(path.to_string());
            }
            Ok(_) => {
                return Err(RegistrarError::storage(format!(
                    "{path} exists and is not a directory"
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RegistrarError::storage(format!("Failed to inspect {path}: {e}")));
            }
        }

        tokio::fs::create_dir_all(&disk_path)
            .await
            .map_err(|e| RegistrarError::storage(format!("Failed to create {path}: {e}")))?;

        tracing::debug!(path, "Created directory");
        Ok(path.to_string())
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), RegistrarError> {
        let disk_path = resolve_storage_path(&self.root, path)?;

        tokio::fs::write(&disk_path, content)
            .await
            .map_err(|e| RegistrarError::storage(format!("Failed to write {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_maps_below_root() {
        let root = Path::new("/srv/storage");

        assert_eq!(
            resolve_storage_path(root, "/home/alice/sites").unwrap(),
            PathBuf::from("/srv/storage/home/alice/sites")
        );
        assert_eq!(
            resolve_storage_path(root, "home/./alice/").unwrap(),
            PathBuf::from("/srv/storage/home/alice")
        );
    }

    #[test]
    fn test_resolve_rejects_escape_and_empty() {
        let root = Path::new("/srv/storage");

        assert!(resolve_storage_path(root, "/home/../../etc").is_err());
        assert!(resolve_storage_path(root, "").is_err());
        assert!(resolve_storage_path(root, "/").is_err());
    }

    #[tokio::test]
    async fn test_mkdir_create_or_reuse_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        let first = fs
            .mkdir("/home/alice/sites/myblog", MkdirMode::CreateOrReuse)
            .await
            .unwrap();
        let second = fs
            .mkdir("/home/alice/sites/myblog", MkdirMode::CreateOrReuse)
            .await
            .unwrap();

        assert_eq!(first, "/home/alice/sites/myblog");
        assert_eq!(first, second);
        assert!(dir.path().join("home/alice/sites/myblog").is_dir());
    }

    #[tokio::test]
    async fn test_mkdir_over_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("taken"), "x").unwrap();
        let fs = LocalFilesystem::new(dir.path());

        assert!(fs.mkdir("/taken", MkdirMode::CreateOrReuse).await.is_err());
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        fs.mkdir("/site", MkdirMode::CreateOrReuse).await.unwrap();

        fs.write("/site/index.html", "one").await.unwrap();
        fs.write("/site/index.html", "two").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("site/index.html")).unwrap();
        assert_eq!(content, "two");
    }

    #[tokio::test]
    async fn test_write_without_directory_fails() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        assert!(fs.write("/missing/index.html", "x").await.is_err());
    }
}
