//! Banner Query Handlers

use std::sync::Arc;

use crate::application::cache::{CacheDomain, CacheKey, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{BannerAdminView, BannerRepositoryPort, BannerView};
use crate::application::queries::{ListAllBanners, ListBanners};
use crate::domain::catalog::{Page, Pagination};

/// ListBanners Handler
pub struct ListBannersHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListBannersHandler {
    pub fn new(banner_repo: Arc<dyn BannerRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { banner_repo, cache }
    }

    pub async fn handle(&self, _query: ListBanners) -> Result<Vec<BannerView>, ApplicationError> {
        let key = CacheKey::build(&CacheDomain::Banner.operation("getBannerList"), &[]);

        self.cache
            .read_through(&key, move || async move {
                Ok::<_, ApplicationError>(self.banner_repo.find_enabled().await?)
            })
            .await
    }
}

/// ListAllBanners Handler（管理端）
pub struct ListAllBannersHandler {
    banner_repo: Arc<dyn BannerRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListAllBannersHandler {
    pub fn new(banner_repo: Arc<dyn BannerRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { banner_repo, cache }
    }

    pub async fn handle(
        &self,
        query: ListAllBanners,
    ) -> Result<Page<BannerAdminView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let status = query.status;

        self.cache
            .read_through_query(
                &CacheDomain::Banner.operation("getAllBanners"),
                &query,
                move || async move {
                    let result = self.banner_repo.find_page(status, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Banner"));
                    }
                    Ok(result)
                },
            )
            .await
    }
}
