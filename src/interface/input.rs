//! Input validation for the user-facing surface.
//!
//! The catalog core trusts its callers; these checks run before a request
//! reaches the repository.

use crate::domain::model::status::BookStatus;

pub const MIN_YEAR: i64 = 1800;
pub const MAX_YEAR: i64 = 2030;
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("year must be between 1800 and 2030, got {0}")]
    YearOutOfRange(i64),

    #[error("search query must contain at least 2 characters")]
    QueryTooShort,

    #[error("search query must not consist only of whitespace or punctuation")]
    QueryWithoutWords,
}

/// タイトル・著者などの必須テキスト。空白のみは拒否し、値は加工せずに返す。
pub fn validate_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, InputError> {
    if value.trim().is_empty() {
        return Err(InputError::EmptyField { field });
    }
    Ok(value)
}

pub fn validate_year(year: i64) -> Result<i32, InputError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(InputError::YearOutOfRange(year));
    }
    i32::try_from(year).map_err(|_| InputError::YearOutOfRange(year))
}

/// 検索語。2文字以上で、単語文字を1つ以上含むこと。
pub fn validate_query(query: &str) -> Result<&str, InputError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(InputError::QueryTooShort);
    }
    if !trimmed.chars().any(|c| c.is_alphanumeric() || c == '_') {
        return Err(InputError::QueryWithoutWords);
    }
    Ok(trimmed)
}

/// メニュー番号 `1` / `2` を正規ラベルに変換する。
/// それ以外は検証せずにそのまま返し、不正値の判定はCatalog側に任せる。
pub fn parse_status_input(input: &str) -> String {
    match input.trim() {
        "1" => BookStatus::Available.as_str().to_string(),
        "2" => BookStatus::CheckedOut.as_str().to_string(),
        other => other.to_string(),
    }
}
