//! User Queries

/// 当前用户资料
#[derive(Debug, Clone)]
pub struct GetUserInfo {
    pub user_id: u64,
}
