//! 推荐引擎
//!
//! 流程:
//! 1. 匿名 / 非普通用户 / 无收藏 -> 全库随机 N 条
//! 2. 收藏条目的风格标签 -> 风格 ID -> 频次统计（仅记录）
//! 3. 同风格且未收藏的随机 N 条
//! 4. 不足 N 条时随机补充，排除已选与已收藏；未收藏条目耗尽后放开收藏条目
//! 5. 根据有序收藏 ID 填充收藏标记
//!
//! 补充循环受最大尝试次数与截止时间约束

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::application::ports::{
    FavoriteRepositoryPort, PlaylistRepositoryPort, PlaylistView, RepositoryError,
    SongRepositoryPort, SongView, StyleRepositoryPort,
};
use crate::domain::catalog::{parse_styles, FavoriteKind};
use crate::domain::recommendation::{
    annotate_like_status, Recommendable, RecommendationSet, StyleFrequency, DEFAULT_QUOTA,
};
use crate::domain::{personalized_user, Identity, SortedIds};

/// 推荐参数
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSettings {
    /// 推荐数量 N
    pub quota: usize,
    /// 随机补充最大轮数
    pub max_fill_attempts: u32,
    /// 随机补充截止时间
    pub fill_deadline: Duration,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
            max_fill_attempts: 8,
            fill_deadline: Duration::from_secs(2),
        }
    }
}

/// 推荐数据源（歌曲、歌单各一个实现）
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    type Item: Recommendable + Send;

    /// 日志用名称
    fn name(&self) -> &'static str;

    /// 用户收藏的 ID
    async fn favorite_ids(&self, user_id: u64) -> Result<Vec<u64>, RepositoryError>;

    /// 条目的风格标签
    async fn styles_of(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError>;

    /// 风格名转 ID
    async fn style_ids(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError>;

    /// 同风格条目，排除 exclude
    async fn styled(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<Self::Item>, RepositoryError>;

    /// 随机条目，排除 exclude
    async fn random(&self, limit: usize, exclude: &[u64]) -> Result<Vec<Self::Item>, RepositoryError>;
}

/// 推荐器
pub struct Recommender<S> {
    source: S,
    settings: RecommendationSettings,
}

impl<S: RecommendationSource> Recommender<S> {
    pub fn new(source: S, settings: RecommendationSettings) -> Self {
        Self { source, settings }
    }

    /// 为调用方生成推荐列表，最多 quota 条，ID 不重复
    pub async fn recommend(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<S::Item>, RepositoryError> {
        let Some(user_id) = personalized_user(identity) else {
            return self.random_only().await;
        };

        let favorites = SortedIds::new(self.source.favorite_ids(user_id).await?);
        if favorites.is_empty() {
            tracing::debug!(source = self.source.name(), user_id = user_id, "No favorites, falling back to random");
            return self.random_only().await;
        }

        let labels = self.source.styles_of(favorites.as_slice()).await?;
        let styles = expand_styles(&labels);
        let style_names: Vec<String> = labels.iter().flat_map(|l| parse_styles(l)).collect();
        let style_ids = self.source.style_ids(&style_names).await?;
        let frequency = StyleFrequency::from_style_ids(&style_ids);
        tracing::debug!(
            source = self.source.name(),
            user_id = user_id,
            favorites = favorites.len(),
            styles = styles.len(),
            distinct_style_ids = frequency.distinct_styles(),
            "Resolved favorite styles"
        );

        let quota = self.settings.quota;
        let mut picked = RecommendationSet::new(quota);

        if !styles.is_empty() {
            let styled = self
                .source
                .styled(&styles, favorites.as_slice(), quota)
                .await?;
            picked.offer_all(
                styled
                    .into_iter()
                    .filter(|item| !favorites.contains(item.item_id())),
            );
        }

        self.fill(&mut picked, &favorites).await?;

        let mut items = picked.into_items();
        annotate_like_status(&mut items, &favorites);
        Ok(items)
    }

    async fn random_only(&self) -> Result<Vec<S::Item>, RepositoryError> {
        let quota = self.settings.quota;
        let mut picked = RecommendationSet::new(quota);
        picked.offer_all(self.source.random(quota, &[]).await?);
        if picked.is_empty() {
            tracing::debug!(source = self.source.name(), "Random sampling returned no candidates");
        }
        Ok(picked.into_items())
    }

    /// 随机补充到配额
    async fn fill(
        &self,
        picked: &mut RecommendationSet<S::Item>,
        favorites: &SortedIds,
    ) -> Result<(), RepositoryError> {
        let deadline = Instant::now() + self.settings.fill_deadline;
        let mut include_favorites = false;
        let mut attempts = 0u32;

        while !picked.is_full() && attempts < self.settings.max_fill_attempts {
            if Instant::now() >= deadline {
                tracing::warn!(
                    source = self.source.name(),
                    picked = picked.len(),
                    missing = picked.remaining(),
                    attempts = attempts,
                    "Recommendation fill deadline reached"
                );
                break;
            }
            attempts += 1;

            let exclude = picked.exclusion((!include_favorites).then_some(favorites));
            let batch = self.source.random(self.settings.quota, &exclude).await?;
            let added = if include_favorites {
                picked.offer_all(batch)
            } else {
                picked.offer_all(
                    batch
                        .into_iter()
                        .filter(|item| !favorites.contains(item.item_id())),
                )
            };

            if added == 0 {
                if include_favorites {
                    break;
                }
                // 未收藏条目已耗尽
                include_favorites = true;
            }
        }

        tracing::debug!(
            source = self.source.name(),
            picked = picked.len(),
            attempts = attempts,
            "Recommendation fill finished"
        );
        Ok(())
    }
}

/// 原始标签 + 拆分后的单一风格，保序去重
fn expand_styles(labels: &[String]) -> Vec<String> {
    let mut styles: Vec<String> = Vec::new();
    for label in labels {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        let candidates = std::iter::once(label.to_string()).chain(parse_styles(label));
        for style in candidates {
            if !styles.contains(&style) {
                styles.push(style);
            }
        }
    }
    styles
}

// ============================================================================
// Sources
// ============================================================================

/// 歌曲推荐数据源
pub struct SongSource {
    songs: Arc<dyn SongRepositoryPort>,
    favorites: Arc<dyn FavoriteRepositoryPort>,
    styles: Arc<dyn StyleRepositoryPort>,
}

impl SongSource {
    pub fn new(
        songs: Arc<dyn SongRepositoryPort>,
        favorites: Arc<dyn FavoriteRepositoryPort>,
        styles: Arc<dyn StyleRepositoryPort>,
    ) -> Self {
        Self {
            songs,
            favorites,
            styles,
        }
    }
}

#[async_trait]
impl RecommendationSource for SongSource {
    type Item = SongView;

    fn name(&self) -> &'static str {
        "song"
    }

    async fn favorite_ids(&self, user_id: u64) -> Result<Vec<u64>, RepositoryError> {
        self.favorites.find_ids(user_id, FavoriteKind::Song).await
    }

    async fn styles_of(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError> {
        self.songs.find_styles_by_ids(ids).await
    }

    async fn style_ids(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError> {
        self.styles.find_ids_by_names(names).await
    }

    async fn styled(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<SongView>, RepositoryError> {
        self.songs.find_by_styles(styles, exclude, limit).await
    }

    async fn random(&self, limit: usize, exclude: &[u64]) -> Result<Vec<SongView>, RepositoryError> {
        self.songs.find_random(limit, exclude).await
    }
}

/// 歌单推荐数据源
pub struct PlaylistSource {
    playlists: Arc<dyn PlaylistRepositoryPort>,
    favorites: Arc<dyn FavoriteRepositoryPort>,
    styles: Arc<dyn StyleRepositoryPort>,
}

impl PlaylistSource {
    pub fn new(
        playlists: Arc<dyn PlaylistRepositoryPort>,
        favorites: Arc<dyn FavoriteRepositoryPort>,
        styles: Arc<dyn StyleRepositoryPort>,
    ) -> Self {
        Self {
            playlists,
            favorites,
            styles,
        }
    }
}

#[async_trait]
impl RecommendationSource for PlaylistSource {
    type Item = PlaylistView;

    fn name(&self) -> &'static str {
        "playlist"
    }

    async fn favorite_ids(&self, user_id: u64) -> Result<Vec<u64>, RepositoryError> {
        self.favorites.find_ids(user_id, FavoriteKind::Playlist).await
    }

    async fn styles_of(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError> {
        self.playlists.find_styles_by_ids(ids).await
    }

    async fn style_ids(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError> {
        self.styles.find_ids_by_names(names).await
    }

    async fn styled(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<PlaylistView>, RepositoryError> {
        self.playlists.find_by_styles(styles, exclude, limit).await
    }

    async fn random(
        &self,
        limit: usize,
        exclude: &[u64],
    ) -> Result<Vec<PlaylistView>, RepositoryError> {
        self.playlists.find_random(limit, exclude).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::LikeStatus;
    use std::collections::HashSet;

    #[derive(Debug, Clone)]
    struct Track {
        id: u64,
        style: String,
        like: LikeStatus,
    }

    impl Recommendable for Track {
        fn item_id(&self) -> u64 {
            self.id
        }

        fn set_like_status(&mut self, status: LikeStatus) {
            self.like = status;
        }
    }

    /// 确定性的内存数据源
    struct FakeCatalog {
        tracks: Vec<Track>,
        favorites: Vec<u64>,
        /// 模拟忽略排除集的存储
        ignore_exclude: bool,
    }

    impl FakeCatalog {
        fn new(styles: &[(&str, usize)], favorites: Vec<u64>) -> Self {
            let mut tracks = Vec::new();
            for (style, count) in styles {
                for _ in 0..*count {
                    tracks.push(Track {
                        id: tracks.len() as u64 + 1,
                        style: style.to_string(),
                        like: LikeStatus::Default,
                    });
                }
            }
            Self {
                tracks,
                favorites,
                ignore_exclude: false,
            }
        }
    }

    #[async_trait]
    impl RecommendationSource for FakeCatalog {
        type Item = Track;

        fn name(&self) -> &'static str {
            "fake"
        }

        async fn favorite_ids(&self, _user_id: u64) -> Result<Vec<u64>, RepositoryError> {
            Ok(self.favorites.clone())
        }

        async fn styles_of(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError> {
            Ok(self
                .tracks
                .iter()
                .filter(|t| ids.contains(&t.id))
                .map(|t| t.style.clone())
                .collect())
        }

        async fn style_ids(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError> {
            Ok(names.iter().map(|n| n.len() as u64).collect())
        }

        async fn styled(
            &self,
            styles: &[String],
            exclude: &[u64],
            limit: usize,
        ) -> Result<Vec<Track>, RepositoryError> {
            Ok(self
                .tracks
                .iter()
                .filter(|t| styles.contains(&t.style) && !exclude.contains(&t.id))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn random(&self, limit: usize, exclude: &[u64]) -> Result<Vec<Track>, RepositoryError> {
            Ok(self
                .tracks
                .iter()
                .rev()
                .filter(|t| self.ignore_exclude || !exclude.contains(&t.id))
                .take(limit)
                .cloned()
                .collect())
        }
    }

    fn recommender(catalog: FakeCatalog) -> Recommender<FakeCatalog> {
        Recommender::new(catalog, RecommendationSettings::default())
    }

    fn assert_unique(items: &[Track]) {
        let ids: HashSet<u64> = items.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[tokio::test]
    async fn test_anonymous_gets_random_quota_without_likes() {
        let rec = recommender(FakeCatalog::new(&[("rock", 30)], vec![1, 2]));

        let items = rec.recommend(None).await.unwrap();
        assert_eq!(items.len(), DEFAULT_QUOTA);
        assert_unique(&items);
        assert!(items.iter().all(|t| t.like == LikeStatus::Default));
    }

    #[tokio::test]
    async fn test_admin_is_treated_as_anonymous() {
        let rec = recommender(FakeCatalog::new(&[("rock", 30)], vec![30]));

        let items = rec.recommend(Some(&Identity::admin(1))).await.unwrap();
        assert_eq!(items.len(), DEFAULT_QUOTA);
        assert!(items.iter().all(|t| t.like == LikeStatus::Default));
    }

    #[tokio::test]
    async fn test_user_without_favorites_gets_random() {
        let rec = recommender(FakeCatalog::new(&[("rock", 12)], vec![]));

        let items = rec.recommend(Some(&Identity::user(3))).await.unwrap();
        assert_eq!(items.len(), DEFAULT_QUOTA);
        assert!(items.iter().all(|t| t.like == LikeStatus::Default));
    }

    #[tokio::test]
    async fn test_favorited_pop_user_gets_rock_fill() {
        // 1..=3 pop（全部收藏），4..=23 rock
        let rec = recommender(FakeCatalog::new(&[("pop", 3), ("rock", 20)], vec![1, 2, 3]));

        let items = rec.recommend(Some(&Identity::user(9))).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_unique(&items);
        assert!(items.iter().all(|t| t.id > 3));
        assert!(items.iter().all(|t| t.like == LikeStatus::Default));
    }

    #[tokio::test]
    async fn test_styled_matches_come_first() {
        let rec = recommender(FakeCatalog::new(&[("jazz", 12), ("rock", 20)], vec![1]));

        let items = rec.recommend(Some(&Identity::user(9))).await.unwrap();
        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|t| t.style == "jazz" && t.id != 1));
    }

    #[tokio::test]
    async fn test_every_favorited_catalog_still_fills_quota() {
        let all: Vec<u64> = (1..=12).collect();
        let rec = recommender(FakeCatalog::new(&[("rock", 12)], all));

        let items = rec.recommend(Some(&Identity::user(2))).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_unique(&items);
        assert!(items.iter().all(|t| t.like == LikeStatus::Liked));
    }

    #[tokio::test]
    async fn test_some_favorited_prefers_unfavorited_then_allows_rest() {
        // 12 条，收藏 5 条 -> 7 条未收藏 + 3 条收藏
        let rec = recommender(FakeCatalog::new(&[("rock", 12)], vec![1, 2, 3, 4, 5]));

        let items = rec.recommend(Some(&Identity::user(2))).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_unique(&items);
        let liked = items.iter().filter(|t| t.like == LikeStatus::Liked).count();
        assert_eq!(liked, 3);
        assert!(items
            .iter()
            .filter(|t| t.like == LikeStatus::Liked)
            .all(|t| t.id <= 5));
    }

    #[tokio::test]
    async fn test_small_catalog_returns_what_exists() {
        let rec = recommender(FakeCatalog::new(&[("pop", 2), ("rock", 3)], vec![1]));

        let items = rec.recommend(Some(&Identity::user(2))).await.unwrap();
        assert_eq!(items.len(), 5);
        assert_unique(&items);
    }

    #[tokio::test]
    async fn test_fill_is_bounded_when_store_ignores_exclusion() {
        let mut catalog = FakeCatalog::new(&[("pop", 1), ("rock", 30)], vec![1]);
        catalog.ignore_exclude = true;
        let settings = RecommendationSettings {
            quota: 10,
            max_fill_attempts: 3,
            fill_deadline: Duration::from_secs(1),
        };
        let rec = Recommender::new(catalog, settings);

        // random 每次都返回相同的 10 条，循环在尝试次数内结束
        let items = rec.recommend(Some(&Identity::user(2))).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_unique(&items);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let rec = recommender(FakeCatalog::new(&[], vec![]));
        assert!(rec.recommend(None).await.unwrap().is_empty());
    }

    #[test]
    fn test_expand_styles_keeps_raw_and_parts() {
        let labels = vec!["流行/摇滚".to_string(), "摇滚".to_string(), " ".to_string()];
        assert_eq!(expand_styles(&labels), vec!["流行/摇滚", "流行", "摇滚"]);
    }
}
