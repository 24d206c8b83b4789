//! Domain Layer - 领域层
//!
//! - Catalog Context: 曲库值对象（分页、风格、收藏标记）
//! - Identity: 调用方身份与角色
//! - Membership: 有序 ID 二分查找
//! - Profile: 用户资料校验
//! - Recommendation: 配额、判重、风格频次

pub mod catalog;
pub mod identity;
pub mod membership;
pub mod profile;
pub mod recommendation;

pub use identity::{personalized_user, Identity, Role};
pub use membership::{binary_search_index, SortedIds};
pub use profile::{ProfileError, UserProfile};
