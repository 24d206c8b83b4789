//! Comment Commands

use crate::domain::catalog::CommentTarget;

/// 发表评论
#[derive(Debug, Clone)]
pub struct AddComment {
    pub user_id: u64,
    pub target: CommentTarget,
    pub content: String,
}

/// 删除自己的评论
#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub user_id: u64,
    pub comment_id: u64,
}

/// 点赞 / 取消点赞评论
#[derive(Debug, Clone)]
pub struct LikeComment {
    pub comment_id: u64,
    pub liked: bool,
}
