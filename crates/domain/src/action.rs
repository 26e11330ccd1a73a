//! # アクション
//!
//! Data API が受け付ける操作の閉じた集合。
//!
//! リクエストボディの `action` 文字列は [`ActionKind`] に変換され、`data` は
//! アクションごとの型付きパラメータにデコードされて [`Action`] になる。
//! 未知のアクション名はここで [`DomainError::UnknownAction`] になり、
//! 以降の処理は `match` の網羅性検査に守られる。
//!
//! ## アクション一覧
//!
//! | アクション | `data` | 対象 |
//! |-----------|--------|------|
//! | `getTask` | `{ taskId }` | Tasks（1 行） |
//! | `getTasks` | 不要 | Tasks |
//! | `getTasksByCategoryAndUser` | `{ categoryId }` | Tasks |
//! | `updateTask` | `{ taskId, updates }` | Tasks |
//! | `updateGuestTasks` | `{ guestUserId }` | Tasks（ゲストの全行） |
//! | `createTask` | 任意のフィールド | Tasks |
//! | `deleteTask` | `{ taskId }` | Tasks |
//! | `getCategories` | 不要 | Categories |
//! | `createCategory` | 任意のフィールド | Categories |
//! | `deleteCategory` | `{ categoryId }` | Categories |

use std::str::FromStr;

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    DomainError,
    owner::OwnerId,
    record::{Record, RecordId},
};

/// アクション名
///
/// ワイヤ上の表記は camelCase（例: `getTasksByCategoryAndUser`）。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum ActionKind {
    GetTask,
    GetTasks,
    GetTasksByCategoryAndUser,
    UpdateTask,
    UpdateGuestTasks,
    CreateTask,
    DeleteTask,
    GetCategories,
    CreateCategory,
    DeleteCategory,
}

impl ActionKind {
    /// アクション名をパースする
    ///
    /// 大文字小文字は区別する。
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Self::from_str(name).map_err(|_| DomainError::UnknownAction(name.to_string()))
    }
}

/// 型付きパラメータを持つアクション
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GetTask { task_id: RecordId },
    GetTasks,
    GetTasksByCategory { category_id: RecordId },
    UpdateTask { task_id: RecordId, updates: Record },
    UpdateGuestTasks { guest_user_id: OwnerId },
    CreateTask(Record),
    DeleteTask { task_id: RecordId },
    GetCategories,
    CreateCategory(Record),
    DeleteCategory { category_id: RecordId },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRef {
    task_id: RecordId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRef {
    category_id: RecordId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskUpdate {
    task_id: RecordId,
    updates: Record,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuestReset {
    guest_user_id: OwnerId,
}

impl Action {
    /// アクション名と `data` からアクションを組み立てる
    ///
    /// パラメータを持たないアクションは `data` を無視する。
    pub fn from_parts(kind: ActionKind, data: Value) -> Result<Self, DomainError> {
        let action = match kind {
            ActionKind::GetTask => {
                let TaskRef { task_id } = decode(kind, data)?;
                Self::GetTask { task_id }
            }
            ActionKind::GetTasks => Self::GetTasks,
            ActionKind::GetTasksByCategoryAndUser => {
                let CategoryRef { category_id } = decode(kind, data)?;
                Self::GetTasksByCategory { category_id }
            }
            ActionKind::UpdateTask => {
                let TaskUpdate { task_id, updates } = decode(kind, data)?;
                Self::UpdateTask { task_id, updates }
            }
            ActionKind::UpdateGuestTasks => {
                let GuestReset { guest_user_id } = decode(kind, data)?;
                Self::UpdateGuestTasks { guest_user_id }
            }
            ActionKind::CreateTask => Self::CreateTask(Record::from_value(data)?),
            ActionKind::DeleteTask => {
                let TaskRef { task_id } = decode(kind, data)?;
                Self::DeleteTask { task_id }
            }
            ActionKind::GetCategories => Self::GetCategories,
            ActionKind::CreateCategory => Self::CreateCategory(Record::from_value(data)?),
            ActionKind::DeleteCategory => {
                let CategoryRef { category_id } = decode(kind, data)?;
                Self::DeleteCategory { category_id }
            }
        };
        Ok(action)
    }
}

fn decode<T: DeserializeOwned>(kind: ActionKind, data: Value) -> Result<T, DomainError> {
    serde_json::from_value(data)
        .map_err(|e| DomainError::Validation(format!("{kind} の data が不正です: {e}")))
}
