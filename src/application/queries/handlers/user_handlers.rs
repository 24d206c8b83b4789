//! User Query Handlers

use std::sync::Arc;

use crate::application::cache::{CacheDomain, CacheKey, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{UserInfoView, UserRepositoryPort};
use crate::application::queries::GetUserInfo;

/// GetUserInfo Handler
pub struct GetUserInfoHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl GetUserInfoHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { user_repo, cache }
    }

    pub async fn handle(&self, query: GetUserInfo) -> Result<UserInfoView, ApplicationError> {
        let user_id = query.user_id;
        let key = CacheKey::build(&CacheDomain::User.operation("getUserInfo"), &[&user_id]);

        self.cache
            .read_through(&key, move || async move {
                let user = self
                    .user_repo
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("User"))?;

                Ok::<_, ApplicationError>(UserInfoView {
                    user_id: user.id,
                    username: user.username,
                    phone: user.phone,
                    email: user.email,
                    user_avatar: user.avatar_url,
                    introduction: user.introduction,
                })
            })
            .await
    }
}
