//! Banner Command Handlers

use std::sync::Arc;

use super::blobs::discard_blob;
use crate::application::cache::{CacheDomain, QueryCache};
use crate::application::commands::{AddBanner, DeleteBanners, UpdateBanner, UpdateBannerStatus};
use crate::application::error::ApplicationError;
use crate::application::ports::{BannerRepositoryPort, BlobFolder, BlobStoragePort};

/// AddBanner Handler
pub struct AddBannerHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl AddBannerHandler {
    pub fn new(
        banner_repo: Arc<dyn BannerRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            banner_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: AddBanner) -> Result<u64, ApplicationError> {
        if command.data.is_empty() {
            return Err(ApplicationError::validation("轮播图文件不能为空"));
        }

        let url = self
            .storage
            .upload(BlobFolder::Banners, &command.file_name, &command.data)
            .await?;
        let banner_id = self.banner_repo.create(&url).await?;
        self.cache.invalidate(CacheDomain::Banner).await;

        tracing::info!(banner_id = banner_id, url = %url, "Banner added");
        Ok(banner_id)
    }
}

/// UpdateBanner Handler
///
/// 先上传新图，记录更新后再删旧图
pub struct UpdateBannerHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdateBannerHandler {
    pub fn new(
        banner_repo: Arc<dyn BannerRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            banner_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateBanner) -> Result<String, ApplicationError> {
        if command.data.is_empty() {
            return Err(ApplicationError::validation("轮播图文件不能为空"));
        }

        let banner = self
            .banner_repo
            .find_by_id(command.banner_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Banner"))?;

        let url = self
            .storage
            .upload(BlobFolder::Banners, &command.file_name, &command.data)
            .await?;
        self.banner_repo.update_url(banner.id, &url).await?;
        discard_blob(self.storage.as_ref(), &banner.banner_url).await;
        self.cache.invalidate(CacheDomain::Banner).await;

        tracing::info!(banner_id = banner.id, url = %url, "Banner image replaced");
        Ok(url)
    }
}

/// UpdateBannerStatus Handler
pub struct UpdateBannerStatusHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl UpdateBannerStatusHandler {
    pub fn new(banner_repo: Arc<dyn BannerRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { banner_repo, cache }
    }

    pub async fn handle(&self, command: UpdateBannerStatus) -> Result<(), ApplicationError> {
        self.banner_repo
            .update_status(command.banner_id, command.status)
            .await?;
        self.cache.invalidate(CacheDomain::Banner).await;

        tracing::info!(
            banner_id = command.banner_id,
            status = ?command.status,
            "Banner status updated"
        );
        Ok(())
    }
}

/// DeleteBanners Handler
pub struct DeleteBannersHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl DeleteBannersHandler {
    pub fn new(
        banner_repo: Arc<dyn BannerRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            banner_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: DeleteBanners) -> Result<u64, ApplicationError> {
        if command.banner_ids.is_empty() {
            return Err(ApplicationError::validation("轮播图 ID 列表不能为空"));
        }

        let banners = self.banner_repo.find_by_ids(&command.banner_ids).await?;
        if banners.is_empty() {
            return Err(ApplicationError::not_found("Banner"));
        }

        for banner in &banners {
            discard_blob(self.storage.as_ref(), &banner.banner_url).await;
        }

        let ids: Vec<u64> = banners.iter().map(|b| b.id).collect();
        let deleted = self.banner_repo.delete_by_ids(&ids).await?;
        self.cache.invalidate(CacheDomain::Banner).await;

        tracing::info!(deleted = deleted, ids = ?ids, "Banners deleted");
        Ok(deleted)
    }
}
