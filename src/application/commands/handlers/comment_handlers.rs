//! Comment Command Handlers
//!
//! 评论挂在歌曲/歌单详情的缓存里，写操作只清理所属对象的域

use std::sync::Arc;

use crate::application::cache::{CacheDomain, QueryCache};
use crate::application::commands::{AddComment, DeleteComment, LikeComment};
use crate::application::error::ApplicationError;
use crate::application::ports::{CommentRepositoryPort, PlaylistRepositoryPort, SongRepositoryPort};
use crate::domain::catalog::{require_name, CommentTarget};

const MAX_COMMENT_CHARS: usize = 500;

fn target_domain(target: CommentTarget) -> CacheDomain {
    match target {
        CommentTarget::Song(_) => CacheDomain::Song,
        CommentTarget::Playlist(_) => CacheDomain::Playlist,
    }
}

/// AddComment Handler
pub struct AddCommentHandler {
    comment_repo: Arc<dyn CommentRepositoryPort>,
    song_repo: Arc<dyn SongRepositoryPort>,
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl AddCommentHandler {
    pub fn new(
        comment_repo: Arc<dyn CommentRepositoryPort>,
        song_repo: Arc<dyn SongRepositoryPort>,
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            comment_repo,
            song_repo,
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: AddComment) -> Result<u64, ApplicationError> {
        let content = require_name("评论内容", &command.content, MAX_COMMENT_CHARS)?;

        let exists = match command.target {
            CommentTarget::Song(id) => self.song_repo.find_by_id(id).await?.is_some(),
            CommentTarget::Playlist(id) => self.playlist_repo.find_by_id(id).await?.is_some(),
        };
        if !exists {
            return Err(ApplicationError::not_found("Comment target"));
        }

        let comment_id = self
            .comment_repo
            .create(command.user_id, command.target, &content)
            .await?;
        self.cache.invalidate(target_domain(command.target)).await;

        tracing::info!(
            comment_id = comment_id,
            user_id = command.user_id,
            target = ?command.target,
            "Comment added"
        );
        Ok(comment_id)
    }
}

/// DeleteComment Handler
///
/// 只能删除自己的评论
pub struct DeleteCommentHandler {
    comment_repo: Arc<dyn CommentRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl DeleteCommentHandler {
    pub fn new(comment_repo: Arc<dyn CommentRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            comment_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: DeleteComment) -> Result<(), ApplicationError> {
        let comment = self
            .comment_repo
            .find_by_id(command.comment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Comment"))?;

        if comment.user_id != command.user_id {
            tracing::warn!(
                comment_id = comment.id,
                owner = comment.user_id,
                caller = command.user_id,
                "Refused to delete another user's comment"
            );
            return Err(ApplicationError::Forbidden);
        }

        self.comment_repo.delete(comment.id).await?;
        self.cache.invalidate(target_domain(comment.target)).await;

        tracing::info!(comment_id = comment.id, "Comment deleted");
        Ok(())
    }
}

/// LikeComment Handler
pub struct LikeCommentHandler {
    comment_repo: Arc<dyn CommentRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl LikeCommentHandler {
    pub fn new(comment_repo: Arc<dyn CommentRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            comment_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: LikeComment) -> Result<(), ApplicationError> {
        let comment = self
            .comment_repo
            .find_by_id(command.comment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Comment"))?;

        let changed = if command.liked {
            self.comment_repo.increment_likes(comment.id).await?;
            true
        } else {
            self.comment_repo.decrement_likes(comment.id).await?
        };

        // 点赞数已为 0 时取消点赞不改动任何数据
        if changed {
            self.cache.invalidate(target_domain(comment.target)).await;
        }

        tracing::debug!(
            comment_id = comment.id,
            liked = command.liked,
            changed,
            "Comment like toggled"
        );
        Ok(())
    }
}
