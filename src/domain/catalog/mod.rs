//! Catalog Context - 曲库限界上下文
//!
//! 歌曲、歌手、歌单、轮播图、评论共享的值对象

mod errors;
mod value_objects;

pub use errors::CatalogError;
pub use value_objects::{
    parse_styles, require_name, BannerStatus, CommentTarget, FavoriteKind, FavoriteTarget, Gender,
    LikeStatus, Page, Pagination, MAX_PAGE_SIZE,
};
