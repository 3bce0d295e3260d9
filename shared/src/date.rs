//! 时间解析模块
//!
//! 后端返回的 `created_at` 是字符串，格式并不固定：
//! - RFC 3339（`2023-05-15T10:30:00Z`）
//! - 不带时区的日期时间（`2023-05-15T10:30:00` / `2023-05-15 10:30:00.123`）
//! - 纯日期（`2023-05-15`）

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// 解析为日期部分
///
/// 返回 None 如果所有格式都无法匹配
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// 格式化为 `YYYY-MM-DD`，无法解析时原样返回
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}
