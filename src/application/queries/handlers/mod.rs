//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod artist_handlers;
mod banner_handlers;
mod count_handlers;
mod favorite_handlers;
mod likes;
mod playlist_handlers;
mod song_handlers;
mod user_handlers;

pub use artist_handlers::*;
pub use banner_handlers::*;
pub use count_handlers::*;
pub use favorite_handlers::*;
pub use playlist_handlers::*;
pub use song_handlers::*;
pub use user_handlers::*;
