//! Catalog Context - Value Objects

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CatalogError;

/// 单页最大条数
pub const MAX_PAGE_SIZE: u32 = 100;

/// 分页参数
///
/// 不变量:
/// - page_num >= 1
/// - 1 <= page_size <= MAX_PAGE_SIZE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_num: u32,
    page_size: u32,
}

impl Pagination {
    pub fn new(page_num: u32, page_size: u32) -> Result<Self, CatalogError> {
        if page_num == 0 {
            return Err(CatalogError::InvalidPagination(
                "页码必须从 1 开始".to_string(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(CatalogError::InvalidPagination(format!(
                "每页条数必须在 1 到 {} 之间",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self {
            page_num,
            page_size,
        })
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 起始偏移，按 u64 计算，页码再大也不会溢出
    pub fn offset(&self) -> u64 {
        u64::from(self.page_num - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }

    pub fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// 收藏标记，线上格式为 0 / 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeStatus {
    #[default]
    Default,
    Liked,
}

impl LikeStatus {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Self::Liked
        } else {
            Self::Default
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, Self::Liked)
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Liked => 1,
        }
    }
}

impl Serialize for LikeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for LikeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Ok(Self::from_liked(raw != 0))
    }
}

/// 歌手性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Gender {
    Male,
    Female,
    Group,
}

impl TryFrom<u8> for Gender {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Male),
            1 => Ok(Self::Female),
            2 => Ok(Self::Group),
            other => Err(CatalogError::InvalidGender(other)),
        }
    }
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Group => 2,
        }
    }
}

/// 轮播图状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BannerStatus {
    #[default]
    Enabled,
    Disabled,
}

impl TryFrom<u8> for BannerStatus {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Enabled),
            1 => Ok(Self::Disabled),
            other => Err(CatalogError::InvalidBannerStatus(other)),
        }
    }
}

impl From<BannerStatus> for u8 {
    fn from(status: BannerStatus) -> Self {
        match status {
            BannerStatus::Enabled => 0,
            BannerStatus::Disabled => 1,
        }
    }
}

/// 收藏类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteKind {
    Song,
    Playlist,
}

impl FavoriteKind {
    /// 数据库中的 type 列: 0-歌曲 1-歌单
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Song => 0,
            Self::Playlist => 1,
        }
    }
}

/// 收藏对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Song(u64),
    Playlist(u64),
}

impl FavoriteTarget {
    pub fn kind(&self) -> FavoriteKind {
        match self {
            Self::Song(_) => FavoriteKind::Song,
            Self::Playlist(_) => FavoriteKind::Playlist,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Song(id) | Self::Playlist(id) => *id,
        }
    }
}

/// 评论对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    Song(u64),
    Playlist(u64),
}

impl CommentTarget {
    /// 数据库中的 kind 列: 0-歌曲 1-歌单
    pub fn kind_code(&self) -> i64 {
        match self {
            Self::Song(_) => 0,
            Self::Playlist(_) => 1,
        }
    }

    pub fn from_parts(kind_code: i64, id: u64) -> Option<Self> {
        match kind_code {
            0 => Some(Self::Song(id)),
            1 => Some(Self::Playlist(id)),
            _ => None,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Song(id) | Self::Playlist(id) => *id,
        }
    }
}

/// 风格标签分隔符
const STYLE_DELIMITERS: &[char] = &['/', ',', '，', '、', ';', '；', '|', '&'];

/// 拆分复合风格标签，如 "流行/摇滚、民谣"
///
/// 去除首尾空白与空片段，保留首次出现的顺序去重
pub fn parse_styles(label: &str) -> Vec<String> {
    let mut styles: Vec<String> = Vec::new();
    for part in label.split(STYLE_DELIMITERS) {
        let part = part.trim();
        if part.is_empty() || styles.iter().any(|s| s == part) {
            continue;
        }
        styles.push(part.to_string());
    }
    styles
}

/// 校验非空名称
pub fn require_name(field: &'static str, value: &str, max_chars: usize) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::InvalidName(format!("{}不能为空", field)));
    }
    if value.chars().count() > max_chars {
        return Err(CatalogError::InvalidName(format!(
            "{}长度不能超过{}字符",
            field, max_chars
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset() {
        let page = Pagination::new(3, 20).unwrap();
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn test_pagination_offset_beyond_u32() {
        let page = Pagination::new(50_000_000, 100).unwrap();
        assert_eq!(page.offset(), 4_999_999_900);

        let page = Pagination::new(u32::MAX, MAX_PAGE_SIZE).unwrap();
        assert_eq!(page.offset(), (u64::from(u32::MAX) - 1) * 100);
        assert!(i64::try_from(page.offset()).is_ok());
    }

    #[test]
    fn test_pagination_rejects_zero() {
        assert!(Pagination::new(0, 10).is_err());
        assert!(Pagination::new(1, 0).is_err());
        assert!(Pagination::new(1, MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_like_status_wire_format() {
        assert_eq!(serde_json::to_string(&LikeStatus::Liked).unwrap(), "1");
        assert_eq!(serde_json::to_string(&LikeStatus::Default).unwrap(), "0");
        let parsed: LikeStatus = serde_json::from_str("1").unwrap();
        assert!(parsed.is_liked());
    }

    #[test]
    fn test_parse_compound_style() {
        assert_eq!(
            parse_styles(" 流行/摇滚、 民谣 ,流行 "),
            vec!["流行", "摇滚", "民谣"]
        );
        assert_eq!(parse_styles("Rock"), vec!["Rock"]);
        assert!(parse_styles(" / , ").is_empty());
    }

    #[test]
    fn test_gender_rejects_unknown() {
        assert!(Gender::try_from(7).is_err());
        assert_eq!(Gender::try_from(1).unwrap(), Gender::Female);
    }

    #[test]
    fn test_comment_target_codes() {
        let target = CommentTarget::Playlist(7);
        assert_eq!(target.kind_code(), 1);
        assert_eq!(CommentTarget::from_parts(1, 7), Some(target));
        assert_eq!(CommentTarget::from_parts(0, 3).map(|t| t.id()), Some(3));
        assert!(CommentTarget::from_parts(2, 3).is_none());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("歌名", "  Hey Jude ", 50).unwrap(), "Hey Jude");
        assert!(require_name("歌名", "   ", 50).is_err());
        assert!(require_name("歌名", "abcdef", 5).is_err());
    }
}
