//! Cache Key 构造
//!
//! 格式: `{prefix}:{arg1}-{arg2}-...`
//! - 缺省值 (None) 渲染为空串
//! - 空集合渲染为空串，非空集合以 `,` 连接
//! - 相同前缀 + 相同参数值 => 相同 key
//! - 片段内的 `\`、`:`、`-`、`,` 以 `\` 转义，不同参数值不会拼出同一个 key

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::application::ports::CacheError;

/// 可作为 key 片段的参数
pub trait KeyArg {
    fn key_fragment(&self) -> String;
}

macro_rules! impl_key_arg_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl KeyArg for $ty {
                fn key_fragment(&self) -> String {
                    escape(&self.to_string())
                }
            }
        )*
    };
}

impl_key_arg_display!(u8, u16, u32, u64, usize, i8, i16, i32, i64, bool, char, str, String);

impl<T: KeyArg + ?Sized> KeyArg for &T {
    fn key_fragment(&self) -> String {
        (**self).key_fragment()
    }
}

impl<T: KeyArg> KeyArg for Option<T> {
    fn key_fragment(&self) -> String {
        match self {
            Some(value) => value.key_fragment(),
            None => String::new(),
        }
    }
}

impl<T: KeyArg> KeyArg for [T] {
    fn key_fragment(&self) -> String {
        self.iter()
            .map(KeyArg::key_fragment)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: KeyArg> KeyArg for Vec<T> {
    fn key_fragment(&self) -> String {
        self.as_slice().key_fragment()
    }
}

/// 缓存 key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// 按位置拼接参数
    pub fn build(prefix: &str, args: &[&dyn KeyArg]) -> Self {
        Self(join(prefix, args.iter().map(|arg| arg.key_fragment())))
    }

    /// 由查询结构体派生 key
    ///
    /// 结构体按字段名字典序展开，读写两侧共用同一结构体，不存在参数错位
    pub fn for_query<Q: Serialize>(prefix: &str, query: &Q) -> Result<Self, CacheError> {
        let value = serde_json::to_value(query)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        let fragments: Vec<String> = match &value {
            Value::Object(fields) => {
                let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                entries.into_iter().map(|(_, v)| render(v)).collect()
            }
            Value::Null => Vec::new(),
            other => vec![render(other)],
        };

        Ok(Self(join(prefix, fragments.into_iter())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn join(prefix: &str, fragments: impl Iterator<Item = String>) -> String {
    let mut key = prefix.to_string();
    for (i, fragment) in fragments.enumerate() {
        key.push(if i == 0 { ':' } else { '-' });
        key.push_str(&fragment);
    }
    key
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | ':' | '-' | ',') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => escape(&n.to_string()),
        Value::String(s) => escape(s),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // 嵌套结构整体转义，避免内部 `,` 与外层分隔符混淆
                Value::Array(_) | Value::Object(_) => escape(&item.to_string()),
                scalar => render(scalar),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => escape(&value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_args_render_empty() {
        let key = CacheKey::build("song:getAllSongs", &[&None::<&str>, &"Alice", &None::<&str>]);
        assert_eq!(key.as_str(), "song:getAllSongs:-Alice-");
    }

    #[test]
    fn test_key_is_deterministic_and_value_sensitive() {
        let a = CacheKey::build("song:getAllSongs", &[&None::<&str>, &"Alice", &None::<&str>]);
        let b = CacheKey::build("song:getAllSongs", &[&None::<&str>, &"Alice", &None::<&str>]);
        let c = CacheKey::build("song:getAllSongs", &[&None::<&str>, &"Bob", &None::<&str>]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_collections_and_numbers() {
        let ids: Vec<u64> = vec![3, 1];
        let empty: Vec<u64> = Vec::new();
        let key = CacheKey::build("favorite:ids", &[&7u64, &ids, &empty, &true]);
        assert_eq!(key.as_str(), "favorite:ids:7-3,1--true");
    }

    #[test]
    fn test_prefix_only() {
        assert_eq!(CacheKey::build("banner:getBannerList", &[]).as_str(), "banner:getBannerList");
    }

    #[derive(Serialize)]
    struct ListQuery {
        page_num: u32,
        artist_name: Option<String>,
        album: Option<String>,
    }

    #[test]
    fn test_for_query_orders_fields_by_name() {
        let query = ListQuery {
            page_num: 2,
            artist_name: Some("Alice".to_string()),
            album: None,
        };
        let key = CacheKey::for_query("song:getAllSongs", &query).unwrap();
        // album, artist_name, page_num
        assert_eq!(key.as_str(), "song:getAllSongs:-Alice-2");
    }

    #[test]
    fn test_for_query_distinguishes_filters() {
        let alice = ListQuery {
            page_num: 1,
            artist_name: Some("Alice".to_string()),
            album: None,
        };
        let bob = ListQuery {
            page_num: 1,
            artist_name: Some("Bob".to_string()),
            album: None,
        };
        assert_ne!(
            CacheKey::for_query("song:getAllSongs", &alice).unwrap(),
            CacheKey::for_query("song:getAllSongs", &bob).unwrap()
        );
    }

    #[test]
    fn test_separators_inside_values_are_escaped() {
        let split = ListQuery {
            page_num: 1,
            artist_name: Some("y-".to_string()),
            album: Some("x".to_string()),
        };
        let joined = ListQuery {
            page_num: 1,
            artist_name: None,
            album: Some("x-y".to_string()),
        };
        let split = CacheKey::for_query("song:getAllSongs", &split).unwrap();
        let joined = CacheKey::for_query("song:getAllSongs", &joined).unwrap();
        assert_ne!(split, joined);
        assert_eq!(split.as_str(), "song:getAllSongs:x-y\\--1");
        assert_eq!(joined.as_str(), "song:getAllSongs:x\\-y--1");
    }

    #[test]
    fn test_escaping_in_positional_keys() {
        let a = CacheKey::build("song:x", &[&"a-b", &"c"]);
        let b = CacheKey::build("song:x", &[&"a", &"b-c"]);
        let negative = CacheKey::build("song:x", &[&None::<u64>, &1i64]);
        let single = CacheKey::build("song:x", &[&-1i64]);
        assert_ne!(a, b);
        assert_ne!(negative, single);
        let list = CacheKey::build("song:x", &[&vec!["a,b".to_string()]]);
        let pair = CacheKey::build("song:x", &[&vec!["a".to_string(), "b".to_string()]]);
        assert_ne!(list, pair);
    }

    #[test]
    fn test_for_query_scalar() {
        let key = CacheKey::for_query("song:getSongDetail", &42u64).unwrap();
        assert_eq!(key.as_str(), "song:getSongDetail:42");
    }
}
