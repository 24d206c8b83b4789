//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod account_handlers;
mod artist_handlers;
mod banner_handlers;
mod blobs;
mod comment_handlers;
mod favorite_handlers;
mod playlist_handlers;
mod song_handlers;

pub use account_handlers::*;
pub use artist_handlers::*;
pub use banner_handlers::*;
pub use comment_handlers::*;
pub use favorite_handlers::*;
pub use playlist_handlers::*;
pub use song_handlers::*;
