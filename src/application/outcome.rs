use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::model::id::BookId;
use crate::domain::model::status::BookStatus;

/// CatalogRepositoryの変更操作の結果。
/// 重複・未登録・不正な状態値は `Rejected` として返り、エラーにはならない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(BookId),
    Removed(BookId),
    StatusChanged { id: BookId, status: BookStatus },
    /// 既に同じ状態だった。成功扱いで、内容は変わらない。
    StatusUnchanged { id: BookId, status: BookStatus },
    Rejected(DomainError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&DomainError> {
        match self {
            Outcome::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomainError> for Outcome {
    fn from(e: DomainError) -> Self {
        Outcome::Rejected(e)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added(id) => write!(f, "Added book with ID {id}"),
            Outcome::Removed(id) => write!(f, "Removed book with ID {id}"),
            Outcome::StatusChanged { id, status } => {
                write!(f, "Status of book {id} changed to '{status}'")
            }
            Outcome::StatusUnchanged { id, status } => {
                write!(f, "Status of book {id} is already '{status}'")
            }
            Outcome::Rejected(e) => write!(f, "Rejected: {e}"),
        }
    }
}
