//! 推荐结果的领域规则
//!
//! - 配额内不重复（HashSet 判重）
//! - 收藏标记通过有序收藏 ID 二分查找填充
//! - 风格频次只做统计，不参与加权

use std::collections::{HashMap, HashSet};

use super::catalog::LikeStatus;
use super::membership::SortedIds;

/// 默认推荐数量
pub const DEFAULT_QUOTA: usize = 10;

/// 可推荐的条目（歌曲、歌单）
pub trait Recommendable {
    fn item_id(&self) -> u64;
    fn set_like_status(&mut self, status: LikeStatus);
}

/// 按配额累积的推荐结果
#[derive(Debug, Clone)]
pub struct RecommendationSet<T> {
    quota: usize,
    items: Vec<T>,
    seen: HashSet<u64>,
}

impl<T: Recommendable> RecommendationSet<T> {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            items: Vec::with_capacity(quota),
            seen: HashSet::with_capacity(quota),
        }
    }

    /// 加入一个候选，重复或已满时返回 false
    pub fn offer(&mut self, item: T) -> bool {
        if self.is_full() || !self.seen.insert(item.item_id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// 依次加入候选，返回实际加入数量
    pub fn offer_all(&mut self, candidates: impl IntoIterator<Item = T>) -> usize {
        let mut added = 0;
        for item in candidates {
            if self.is_full() {
                break;
            }
            if self.offer(item) {
                added += 1;
            }
        }
        added
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.quota
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.quota.saturating_sub(self.items.len())
    }

    /// 已选 ID，可选并入收藏 ID，用作随机补充的排除集
    pub fn exclusion(&self, favorites: Option<&SortedIds>) -> Vec<u64> {
        let mut ids: Vec<u64> = self.seen.iter().copied().collect();
        if let Some(favorites) = favorites {
            ids.extend(
                favorites
                    .as_slice()
                    .iter()
                    .filter(|id| !self.seen.contains(id)),
            );
        }
        ids.sort_unstable();
        ids
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// 根据有序收藏列表填充收藏标记
pub fn annotate_like_status<T: Recommendable>(items: &mut [T], favorites: &SortedIds) {
    for item in items.iter_mut() {
        item.set_like_status(LikeStatus::from_liked(favorites.contains(item.item_id())));
    }
}

/// 风格出现频次
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFrequency(HashMap<u64, usize>);

impl StyleFrequency {
    pub fn from_style_ids(style_ids: &[u64]) -> Self {
        let mut counts = HashMap::new();
        for id in style_ids {
            *counts.entry(*id).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn distinct_styles(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        like: LikeStatus,
    }

    impl Item {
        fn new(id: u64) -> Self {
            Self {
                id,
                like: LikeStatus::Default,
            }
        }
    }

    impl Recommendable for Item {
        fn item_id(&self) -> u64 {
            self.id
        }

        fn set_like_status(&mut self, status: LikeStatus) {
            self.like = status;
        }
    }

    #[test]
    fn test_offer_rejects_duplicates() {
        let mut set = RecommendationSet::new(3);
        assert!(set.offer(Item::new(1)));
        assert!(!set.offer(Item::new(1)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.remaining(), 2);
    }

    #[test]
    fn test_offer_all_stops_at_quota() {
        let mut set = RecommendationSet::new(3);
        let added = set.offer_all((1..=10).map(Item::new));
        assert_eq!(added, 3);
        assert!(set.is_full());
        assert!(!set.offer(Item::new(42)));
    }

    #[test]
    fn test_exclusion_merges_favorites() {
        let mut set = RecommendationSet::new(5);
        set.offer_all([Item::new(4), Item::new(2)]);
        let favorites = SortedIds::new(vec![2, 7]);
        assert_eq!(set.exclusion(Some(&favorites)), vec![2, 4, 7]);
        assert_eq!(set.exclusion(None), vec![2, 4]);
    }

    #[test]
    fn test_annotate_like_status() {
        let mut items = vec![Item::new(1), Item::new(3), Item::new(8)];
        annotate_like_status(&mut items, &SortedIds::new(vec![3, 9]));
        assert_eq!(items[0].like, LikeStatus::Default);
        assert_eq!(items[1].like, LikeStatus::Liked);
        assert_eq!(items[2].like, LikeStatus::Default);
    }

    #[test]
    fn test_style_frequency_counts() {
        let freq = StyleFrequency::from_style_ids(&[1, 2, 1, 1]);
        assert_eq!(freq.distinct_styles(), 2);
        assert_eq!(StyleFrequency::from_style_ids(&[]).distinct_styles(), 0);
    }
}
