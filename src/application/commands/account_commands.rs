//! Account Commands

/// 退出登录
#[derive(Debug, Clone)]
pub struct Logout {
    pub token: String,
}

/// 注销账号
#[derive(Debug, Clone)]
pub struct DeleteAccount {
    pub user_id: u64,
    pub token: String,
}

/// 修改个人资料
#[derive(Debug, Clone)]
pub struct UpdateUserInfo {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub introduction: String,
}

/// 修改个人头像
#[derive(Debug, Clone)]
pub struct UpdateUserAvatar {
    pub user_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
}
