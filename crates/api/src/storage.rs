//! Local-disk storage for uploaded files.
//!
//! Files are written under the configured upload root and served back by
//! the `/uploads` static route, so a stored key maps directly to a URL.

use std::path::{Component, Path, PathBuf};

use crate::error::{AppError, AppResult};

pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url,
        }
    }

    /// Public URL of a stored key.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/uploads/{key}", self.public_base_url)
    }

    /// Reverse of [`url_for`](Self::url_for). `None` for URLs that do not
    /// point into this storage (external links, empty strings) or whose key
    /// would escape the upload root.
    pub fn key_for_url<'u>(&self, url: &'u str) -> Option<&'u str> {
        url.strip_prefix(&self.public_base_url)?
            .strip_prefix("/uploads/")
            .filter(|k| is_safe_key(k))
    }

    /// Path of `key` under the upload root.
    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        if !is_safe_key(key) {
            return Err(AppError::BadRequest(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(key))
    }

    /// Write `data` under `key`, creating parent directories, and return the
    /// public URL.
    pub async fn save(&self, key: &str, data: &[u8]) -> AppResult<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        }
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::debug!(key, bytes = data.len(), "Stored upload");
        Ok(self.url_for(key))
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(key, "Upload already removed from storage");
                Ok(())
            }
            Err(e) => Err(AppError::InternalError(format!(
                "Failed to delete upload: {e}"
            ))),
        }
    }
}

/// A key is a relative path made only of normal segments: no empty, `.`
/// or `..` parts and no root or drive prefix.
fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
        && Path::new(key)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_rooted_at_uploads() {
        let storage = LocalStorage::new("uploads".into(), "http://localhost:5001".into());
        assert_eq!(
            storage.url_for("creators/cara/profile/ab.png"),
            "http://localhost:5001/uploads/creators/cara/profile/ab.png"
        );
    }

    #[test]
    fn key_round_trips_through_url() {
        let storage = LocalStorage::new("uploads".into(), "http://x".into());
        let url = storage.url_for("campaigns/a.png");
        assert_eq!(storage.key_for_url(&url), Some("campaigns/a.png"));
        assert_eq!(storage.key_for_url("https://cdn.example.com/a.png"), None);
        assert_eq!(storage.key_for_url(""), None);
    }

    #[tokio::test]
    async fn save_then_delete() {
        let root = std::env::temp_dir().join(format!("fundify-storage-{}", uuid::Uuid::new_v4()));
        let storage = LocalStorage::new(root.clone(), "http://x".into());

        let url = storage.save("a/b/file.txt", b"hello").await.unwrap();
        assert_eq!(url, "http://x/uploads/a/b/file.txt");
        assert_eq!(tokio::fs::read(root.join("a/b/file.txt")).await.unwrap(), b"hello");

        storage.delete("a/b/file.txt").await.unwrap();
        // Deleting twice is fine.
        storage.delete("a/b/file.txt").await.unwrap();

        let _ = tokio::fs::remove_dir_all(root).await;
    }

    #[test]
    fn keys_with_dot_segments_are_rejected() {
        assert!(is_safe_key("creators/cara/profile/ab.png"));
        assert!(!is_safe_key("../victim.txt"));
        assert!(!is_safe_key("a/../../victim.txt"));
        assert!(!is_safe_key("a/./b.png"));
        assert!(!is_safe_key("a//b.png"));
        assert!(!is_safe_key("/etc/passwd"));
        assert!(!is_safe_key(""));
    }

    #[tokio::test]
    async fn traversal_url_cannot_delete_outside_root() {
        let base = std::env::temp_dir().join(format!("fundify-storage-{}", uuid::Uuid::new_v4()));
        let root = base.join("uploads");
        tokio::fs::create_dir_all(&root).await.unwrap();
        let outside = base.join("victim.txt");
        tokio::fs::write(&outside, b"keep me").await.unwrap();

        let storage = LocalStorage::new(root, "http://localhost:5001".into());
        assert_eq!(
            storage.key_for_url("http://localhost:5001/uploads/../victim.txt"),
            None
        );
        assert!(storage.delete("../victim.txt").await.is_err());
        assert!(storage.save("../victim.txt", b"overwrite").await.is_err());
        assert_eq!(tokio::fs::read(&outside).await.unwrap(), b"keep me");

        let _ = tokio::fs::remove_dir_all(base).await;
    }
}
