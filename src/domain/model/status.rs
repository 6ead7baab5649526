use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// 貸出状態。値域はこの2つのみ。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    /// 在庫あり
    #[default]
    #[serde(rename = "available", alias = "в наличии")]
    Available,
    /// 貸出中
    #[serde(rename = "checked_out", alias = "выдана")]
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::CheckedOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = DomainError;

    /// 正規ラベルに加え、旧データのラベルも受け付ける。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" | "в наличии" => Ok(BookStatus::Available),
            "checked_out" | "выдана" => Ok(BookStatus::CheckedOut),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}
