//! Account Command Handlers

use std::sync::Arc;

use super::blobs::discard_blob;
use crate::application::cache::{QueryCache, ACCOUNT_DOMAINS, PROFILE_DOMAINS};
use crate::application::commands::{DeleteAccount, Logout, UpdateUserAvatar, UpdateUserInfo};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BlobFolder, BlobStoragePort, CommentRepositoryPort, FavoriteRepositoryPort, UserRepositoryPort,
};
use crate::application::session::SessionStore;
use crate::domain::UserProfile;

/// Logout Handler
pub struct LogoutHandler {
    sessions: Arc<SessionStore>,
    cache: Arc<QueryCache>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<SessionStore>, cache: Arc<QueryCache>) -> Self {
        Self { sessions, cache }
    }

    pub async fn handle(&self, command: Logout) -> Result<(), ApplicationError> {
        self.sessions.revoke(&command.token).await;
        self.cache.invalidate_all(ACCOUNT_DOMAINS).await;
        Ok(())
    }
}

/// DeleteAccount Handler
///
/// 顺序: 头像文件 -> 收藏 -> 评论 -> 用户记录 -> 会话 -> 缓存
pub struct DeleteAccountHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    comment_repo: Arc<dyn CommentRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    sessions: Arc<SessionStore>,
    cache: Arc<QueryCache>,
}

impl DeleteAccountHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        comment_repo: Arc<dyn CommentRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        sessions: Arc<SessionStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            user_repo,
            favorite_repo,
            comment_repo,
            storage,
            sessions,
            cache,
        }
    }

    pub async fn handle(&self, command: DeleteAccount) -> Result<(), ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User"))?;

        discard_blob(self.storage.as_ref(), &user.avatar_url).await;
        self.favorite_repo.delete_by_user(user.id).await?;
        self.comment_repo.delete_by_user(user.id).await?;
        self.user_repo.delete(user.id).await?;
        self.sessions.revoke(&command.token).await;
        self.cache.invalidate_all(ACCOUNT_DOMAINS).await;

        tracing::info!(user_id = user.id, username = %user.username, "Account deleted");
        Ok(())
    }
}

/// UpdateUserInfo Handler
///
/// 用户名、邮箱不能与其他用户重复
pub struct UpdateUserInfoHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl UpdateUserInfoHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { user_repo, cache }
    }

    pub async fn handle(&self, command: UpdateUserInfo) -> Result<(), ApplicationError> {
        let profile = UserProfile::new(
            &command.username,
            &command.email,
            &command.phone,
            &command.introduction,
        )?;

        let taken_by_other = |owner: Option<u64>| owner.is_some_and(|id| id != command.user_id);
        if taken_by_other(self.user_repo.find_id_by_username(&profile.username).await?) {
            return Err(ApplicationError::conflict("用户名已存在"));
        }
        if taken_by_other(self.user_repo.find_id_by_email(&profile.email).await?) {
            return Err(ApplicationError::conflict("邮箱已被使用"));
        }

        self.user_repo.update_profile(command.user_id, &profile).await?;
        self.cache.invalidate_all(PROFILE_DOMAINS).await;

        tracing::info!(
            user_id = command.user_id,
            username = %profile.username,
            "User profile updated"
        );
        Ok(())
    }
}

/// UpdateUserAvatar Handler
pub struct UpdateUserAvatarHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdateUserAvatarHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            user_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateUserAvatar) -> Result<String, ApplicationError> {
        if command.data.is_empty() {
            return Err(ApplicationError::validation("头像文件不能为空"));
        }

        let user = self
            .user_repo
            .find_by_id(command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User"))?;

        let url = self
            .storage
            .upload(BlobFolder::UserAvatars, &command.file_name, &command.data)
            .await?;
        self.user_repo.update_avatar(user.id, &url).await?;
        discard_blob(self.storage.as_ref(), &user.avatar_url).await;
        self.cache.invalidate_all(PROFILE_DOMAINS).await;

        tracing::info!(user_id = user.id, url = %url, "User avatar updated");
        Ok(url)
    }
}
