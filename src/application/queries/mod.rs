//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod artist_queries;
mod banner_queries;
mod count_queries;
mod favorite_queries;
mod playlist_queries;
mod song_queries;
mod user_queries;

pub mod handlers;

pub use artist_queries::*;
pub use banner_queries::*;
pub use count_queries::*;
pub use favorite_queries::*;
pub use playlist_queries::*;
pub use song_queries::*;
pub use user_queries::*;
