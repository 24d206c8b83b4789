//! SQLite 仓储公共辅助

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use crate::application::ports::RepositoryError;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

/// 去掉首尾空白后非空的筛选值
pub(super) fn filter_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(super) fn like_pattern(value: &str) -> String {
    format!("%{}%", value)
}

/// 追加 `(?, ?, ...)`，调用方保证 ids 非空
pub(super) fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[u64]) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id as i64);
    }
    separated.push_unseparated(")");
}

/// 追加 `(?, ?, ...)`，调用方保证 values 非空
pub(super) fn push_text_list(qb: &mut QueryBuilder<'_, Sqlite>, values: &[String]) {
    qb.push("(");
    let mut separated = qb.separated(", ");
    for value in values {
        separated.push_bind(value.clone());
    }
    separated.push_unseparated(")");
}

pub(super) fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|e| RepositoryError::SerializationError(format!("{}: {}", raw, e))),
    }
}

pub(super) fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format(DATE_FORMAT).to_string())
}
