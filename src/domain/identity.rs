//! 调用方身份

use serde::{Deserialize, Serialize};

/// 角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

/// 已认证的调用方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: u64,
    pub role: Role,
}

impl Identity {
    pub fn user(user_id: u64) -> Self {
        Self {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: u64) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 仅普通用户参与个性化（收藏标记、推荐）
pub fn personalized_user(identity: Option<&Identity>) -> Option<u64> {
    identity.filter(|i| i.is_user()).map(|i| i.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let json = serde_json::to_string(&Identity::admin(1)).unwrap();
        assert!(json.contains("ROLE_ADMIN"));
    }

    #[test]
    fn test_only_users_are_personalized() {
        assert_eq!(personalized_user(Some(&Identity::user(7))), Some(7));
        assert_eq!(personalized_user(Some(&Identity::admin(7))), None);
        assert_eq!(personalized_user(None), None);
    }
}
