//! 有序 ID 集合上的成员判断

/// 在升序切片中二分查找，返回下标
///
/// 前置条件: `sorted` 升序；不满足时结果无意义
pub fn binary_search_index<T: Ord>(sorted: &[T], target: &T) -> Option<usize> {
    sorted.binary_search(target).ok()
}

/// 升序且去重的 ID 列表
///
/// 构造时排序，二分查找的前置条件由类型保证
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedIds(Vec<u64>);

impl SortedIds {
    pub fn new(mut ids: Vec<u64>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn contains(&self, id: u64) -> bool {
        binary_search_index(&self.0, &id).is_some()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u64>> for SortedIds {
    fn from(ids: Vec<u64>) -> Self {
        Self::new(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_search_found_and_missing() {
        let ids = [1u64, 3, 5, 9];
        assert_eq!(binary_search_index(&ids, &5), Some(2));
        assert_eq!(binary_search_index(&ids, &4), None);
        assert_eq!(binary_search_index(&ids, &1), Some(0));
        assert_eq!(binary_search_index(&ids, &9), Some(3));
    }

    #[test]
    fn test_binary_search_empty() {
        let ids: [u64; 0] = [];
        assert_eq!(binary_search_index(&ids, &1), None);
    }

    #[test]
    fn test_sorted_ids_sorts_input() {
        let ids = SortedIds::new(vec![9, 1, 5, 3, 5]);
        assert_eq!(ids.as_slice(), &[1, 3, 5, 9]);
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(5));
        assert!(ids.contains(9));
        assert!(!ids.contains(4));
    }
}
