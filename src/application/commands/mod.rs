//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作，成功返回前完成缓存失效

mod account_commands;
mod artist_commands;
mod banner_commands;
mod comment_commands;
mod favorite_commands;
mod playlist_commands;
mod song_commands;

pub mod handlers;

pub use account_commands::*;
pub use artist_commands::*;
pub use banner_commands::*;
pub use comment_commands::*;
pub use favorite_commands::*;
pub use playlist_commands::*;
pub use song_commands::*;
