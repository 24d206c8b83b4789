//! Local Blob Storage - 本地文件系统对象存储
//!
//! 实现 BlobStoragePort trait，对象落在 `{base_dir}/{folder}/{uuid}.{ext}`，
//! 公开 URL 为 `{public_base_url}/files/{folder}/{name}`

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{BlobFolder, BlobStorageError, BlobStoragePort};

/// 静态文件挂载路径
pub const FILES_ROUTE: &str = "/files";

/// 本地对象存储
pub struct LocalBlobStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 对外访问前缀，如 `http://localhost:8080`
    public_base_url: String,
}

impl LocalBlobStorage {
    /// 创建存储并确保根目录存在
    pub async fn new(
        base_dir: impl AsRef<Path>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, BlobStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        Ok(Self {
            base_dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn url_prefix(&self) -> String {
        format!("{}{}/", self.public_base_url, FILES_ROUTE)
    }

    /// URL -> 根目录下的相对路径，拒绝越界路径
    fn key_from_url<'a>(&self, url: &'a str) -> Result<&'a str, BlobStorageError> {
        let key = url
            .strip_prefix(&self.url_prefix())
            .ok_or_else(|| BlobStorageError::ForeignUrl(url.to_string()))?;

        let escapes = Path::new(key)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(BlobStorageError::InvalidKey(key.to_string()));
        }

        Ok(key)
    }
}

/// 保留原文件扩展名（小写），没有则不带扩展名
fn object_name(file_name: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        Some(ext) => format!("{}.{}", id, ext.to_ascii_lowercase()),
        None => id,
    }
}

#[async_trait]
impl BlobStoragePort for LocalBlobStorage {
    async fn upload(
        &self,
        folder: BlobFolder,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, BlobStorageError> {
        let dir = self.base_dir.join(folder.as_str());

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        let name = object_name(file_name);
        fs::write(dir.join(&name), data)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            folder = folder.as_str(),
            name = %name,
            size = data.len(),
            "Blob uploaded"
        );

        Ok(format!("{}{}/{}", self.url_prefix(), folder.as_str(), name))
    }

    async fn delete(&self, url: &str) -> Result<(), BlobStorageError> {
        if url.trim().is_empty() {
            return Ok(());
        }

        let key = self.key_from_url(url)?;
        let path = self.base_dir.join(key);

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(key = %key, "Blob already absent");
                Ok(())
            }
            Err(e) => Err(BlobStorageError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_upload_and_delete() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalBlobStorage::new(temp_dir.path(), "http://localhost:8080/")
            .await
            .unwrap();

        let url = storage
            .upload(BlobFolder::SongCovers, "cover.PNG", b"fake png")
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/files/songCovers/"));
        assert!(url.ends_with(".png"));

        let key = storage.key_from_url(&url).unwrap();
        let path = temp_dir.path().join(key);
        assert_eq!(std::fs::read(&path).unwrap(), b"fake png");

        storage.delete(&url).await.unwrap();
        assert!(!path.exists());

        // 重复删除不报错
        storage.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_edge_cases() {
        let temp_dir = tempdir().unwrap();
        let storage = LocalBlobStorage::new(temp_dir.path(), "http://localhost:8080")
            .await
            .unwrap();

        storage.delete("").await.unwrap();

        assert!(matches!(
            storage.delete("https://cdn.example.com/files/songs/a.mp3").await,
            Err(BlobStorageError::ForeignUrl(_))
        ));
        assert!(matches!(
            storage
                .delete("http://localhost:8080/files/../secret.txt")
                .await,
            Err(BlobStorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_object_name_extension() {
        assert!(object_name("song.mp3").ends_with(".mp3"));
        assert!(!object_name("noext").contains('.'));
        assert!(!object_name("weird.m/p3").contains('/'));
    }
}
