//! HTTP Handlers

pub mod admin;
mod artist;
mod banner;
mod comment;
mod favorite;
mod ping;
mod playlist;
mod song;
mod upload;
mod user;

pub use artist::*;
pub use banner::*;
pub use comment::*;
pub use favorite::*;
pub use ping::*;
pub use playlist::*;
pub use song::*;
pub use user::*;
