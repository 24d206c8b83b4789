//! 用户资料
//!
//! 用户名、邮箱、手机号、简介的格式校验

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// 简介最大字符数
pub const MAX_INTRODUCTION_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("用户名格式错误: 4-16 位字母、数字、下划线或连字符")]
    InvalidUsername,

    #[error("邮箱格式错误")]
    InvalidEmail,

    #[error("手机号格式错误")]
    InvalidPhone,

    #[error("简介长度不能超过{0}字符")]
    IntroductionTooLong(usize),
}

static USERNAME: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE: OnceLock<Option<Regex>> = OnceLock::new();

/// 编译失败的模式一律视为不匹配
fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// 校验后的用户资料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    /// 空字符串表示未填写
    pub phone: String,
    pub introduction: String,
}

impl UserProfile {
    pub fn new(
        username: &str,
        email: &str,
        phone: &str,
        introduction: &str,
    ) -> Result<Self, ProfileError> {
        let username = username.trim();
        if !matches(&USERNAME, r"^[a-zA-Z0-9_-]{4,16}$", username) {
            return Err(ProfileError::InvalidUsername);
        }

        let email = email.trim();
        if !matches(&EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email) {
            return Err(ProfileError::InvalidEmail);
        }

        let phone = phone.trim();
        if !phone.is_empty() && !matches(&PHONE, r"^1[3-9]\d{9}$", phone) {
            return Err(ProfileError::InvalidPhone);
        }

        let introduction = introduction.trim();
        if introduction.chars().count() > MAX_INTRODUCTION_CHARS {
            return Err(ProfileError::IntroductionTooLong(MAX_INTRODUCTION_CHARS));
        }

        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            introduction: introduction.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile_is_trimmed() {
        let profile =
            UserProfile::new(" alice_01 ", "alice@example.com ", "", " 爱听民谣 ").unwrap();
        assert_eq!(profile.username, "alice_01");
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.phone, "");
        assert_eq!(profile.introduction, "爱听民谣");
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert_eq!(
            UserProfile::new("ab", "a@b.cn", "", ""),
            Err(ProfileError::InvalidUsername)
        );
        assert_eq!(
            UserProfile::new("alice", "not-an-email", "", ""),
            Err(ProfileError::InvalidEmail)
        );
        assert_eq!(
            UserProfile::new("alice", "a@b.cn", "12345", ""),
            Err(ProfileError::InvalidPhone)
        );
        assert!(UserProfile::new("alice", "a@b.cn", "13812345678", "").is_ok());

        let long = "字".repeat(MAX_INTRODUCTION_CHARS + 1);
        assert_eq!(
            UserProfile::new("alice", "a@b.cn", "", &long),
            Err(ProfileError::IntroductionTooLong(MAX_INTRODUCTION_CHARS))
        );
    }
}
