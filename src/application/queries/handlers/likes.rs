//! 收藏标记辅助

use crate::application::error::ApplicationError;
use crate::application::ports::FavoriteRepositoryPort;
use crate::domain::catalog::FavoriteKind;
use crate::domain::{personalized_user, Identity, SortedIds};

/// 调用方在该域的收藏 ID（有序），匿名或管理员为空
pub(crate) async fn viewer_favorites(
    favorites: &dyn FavoriteRepositoryPort,
    viewer: Option<&Identity>,
    kind: FavoriteKind,
) -> Result<SortedIds, ApplicationError> {
    match personalized_user(viewer) {
        Some(user_id) => Ok(SortedIds::new(favorites.find_ids(user_id, kind).await?)),
        None => Ok(SortedIds::default()),
    }
}
