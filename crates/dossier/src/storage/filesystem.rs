use super::ObjectStore;
use crate::{DossierError, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Object store backed by a local directory tree.
///
/// Bucket `b` and object path `p` resolve to `root/b/p`.
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        let mut resolved = self.root.clone();

        for part in [bucket, path] {
            let relative = Path::new(part);
            let is_plain = relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

            if part.is_empty() || !is_plain {
                return Err(DossierError::invalid_reference(format!(
                    "'{}' does not name an object under the storage root",
                    part
                )));
            }
            resolved.push(relative);
        }

        Ok(resolved)
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let file = self.object_path(bucket, path)?;

        match tokio::fs::read(&file).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DossierError::not_found(bucket, path)),
            Err(e) => Err(DossierError::transport_with_source(
                format!("failed to read {}", file.display()),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_nested_object() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs-bucket/deals")).unwrap();
        std::fs::write(dir.path().join("docs-bucket/deals/acme.txt"), b"acme").unwrap();

        let store = FilesystemObjectStore::new(dir.path());
        let bytes = store.fetch("docs-bucket", "deals/acme.txt").await.unwrap();
        assert_eq!(bytes, b"acme");
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path());

        let err = store.fetch("docs-bucket", "missing.pdf").await.unwrap_err();
        assert!(matches!(err, DossierError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_parent_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let store = FilesystemObjectStore::new(dir.path());

        let err = store.fetch("docs-bucket", "../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, DossierError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_directory_read_is_transport_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("bucket/folder.pdf")).unwrap();
        let store = FilesystemObjectStore::new(dir.path());

        let err = store.fetch("bucket", "folder.pdf").await.unwrap_err();
        assert!(matches!(err, DossierError::Transport { .. }));
    }
}
