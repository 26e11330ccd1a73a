//! # アクションディスパッチャ
//!
//! `POST /api` で `{ action, data, userId }` を受け取り、アクションに対応する
//! ストア操作を 1 回だけ実行する。
//!
//! ## 処理の流れ
//!
//! 1. ボディを JSON としてデコードする（失敗は 500）
//! 2. `action` を [`ActionKind`] に変換する（未知の名前・欠落・文字列以外は 400）
//! 3. `data` を型付きパラメータにデコードする（失敗は 500）
//! 4. 所有者（`userId`）で絞り込んだ操作をユースケースに委譲する
//! 5. `{ success: true, data }` を返す
//!
//! ## 所有者
//!
//! `userId` は上流の認証層で保証されている前提でそのまま信頼する。
//! ゲストリセット（`updateGuestTasks`）だけは `data.guestUserId` を所有者とし、
//! `userId` を使わない。

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use serde_json::Value;
use taskdeck_domain::{
    action::{Action, ActionKind},
    owner::OwnerId,
    record::{RawId, Record},
};
use taskdeck_shared::ApiResponse;

use crate::{
    error::DataApiError,
    usecase::{CategoryUseCaseImpl, TaskUseCaseImpl},
};

/// ディスパッチャの State
pub struct DispatchState {
    pub tasks:      TaskUseCaseImpl,
    pub categories: CategoryUseCaseImpl,
}

/// リクエストボディ
///
/// `action` は JSON のまま受け取る。欠落や文字列以外の値は本文の
/// デコード失敗にならず、未知のアクションになる。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default)]
    pub action:  Value,
    #[serde(default)]
    pub data:    Value,
    #[serde(default)]
    pub user_id: Option<RawId>,
}

/// 成功時の `data`
///
/// 単一行取得で見つからない場合とゲストリセットは `null` になる。
pub type ActionData = Option<Vec<Record>>;

/// アクションディスパッチエンドポイント
///
/// ボディは `Json` エクストラクタを使わずに読む。デコード失敗を 500 の
/// `{ "error": ... }` として返すため。
#[tracing::instrument(skip_all)]
pub async fn dispatch(
    State(state): State<Arc<DispatchState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<ActionData>>, DataApiError> {
    let request: ActionRequest = serde_json::from_slice(&body)
        .map_err(|e| DataApiError::MalformedRequest(format!("リクエストボディが不正です: {e}")))?;

    let kind = parse_kind(&request.action)?;
    let action = Action::from_parts(kind, request.data)?;
    let user_id = request.user_id.map(RawId::into_text);

    tracing::info!(action = %kind, user_id = user_id.as_deref(), "アクションを実行します");

    let data = execute(&state, action, user_id.as_deref()).await?;

    Ok(Json(ApiResponse::new(data)))
}

async fn execute(
    state: &DispatchState,
    action: Action,
    user_id: Option<&str>,
) -> Result<ActionData, DataApiError> {
    let owner = || require_owner(user_id);

    let data = match action {
        Action::GetTask { task_id } => state.tasks.get_task(&owner()?, &task_id).await?,
        Action::GetTasks => Some(state.tasks.list_tasks(&owner()?).await?),
        Action::GetTasksByCategory { category_id } => Some(
            state
                .tasks
                .list_tasks_by_category(&owner()?, &category_id)
                .await?,
        ),
        Action::UpdateTask { task_id, updates } => Some(
            state
                .tasks
                .update_task(&owner()?, &task_id, updates)
                .await?,
        ),
        Action::UpdateGuestTasks { guest_user_id } => {
            state.tasks.reset_guest_tasks(&guest_user_id).await?;
            None
        }
        Action::CreateTask(fields) => Some(state.tasks.create_task(&owner()?, fields).await?),
        Action::DeleteTask { task_id } => {
            Some(state.tasks.delete_task(&owner()?, &task_id).await?)
        }
        Action::GetCategories => Some(state.categories.list_categories(&owner()?).await?),
        Action::CreateCategory(fields) => Some(
            state
                .categories
                .create_category(&owner()?, fields)
                .await?,
        ),
        Action::DeleteCategory { category_id } => Some(
            state
                .categories
                .delete_category(&owner()?, &category_id)
                .await?,
        ),
    };

    Ok(data)
}

/// `action` の値をアクション名に変換する
fn parse_kind(action: &Value) -> Result<ActionKind, DataApiError> {
    match action.as_str() {
        Some(name) => Ok(ActionKind::parse(name)?),
        None => Err(DataApiError::InvalidAction(action.to_string())),
    }
}

/// `userId` から所有者を解決する
///
/// 欠落は不正なリクエスト、空文字列はバリデーションエラーになる（いずれも 500）。
fn require_owner(user_id: Option<&str>) -> Result<OwnerId, DataApiError> {
    let user_id =
        user_id.ok_or_else(|| DataApiError::MalformedRequest("userId は必須です".to_string()))?;
    Ok(OwnerId::new(user_id)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_action_requestはdataとuser_idを省略できる() {
        let request: ActionRequest = serde_json::from_value(json!({"action": "getTasks"})).unwrap();

        assert_eq!(request.action, json!("getTasks"));
        assert_eq!(request.data, Value::Null);
        assert_eq!(request.user_id, None);
    }

    #[rstest]
    #[case(json!("u1"), "u1")]
    #[case(json!(42), "42")]
    fn test_action_requestはcamel_caseのuser_idを文字列か整数で読む(
        #[case] user_id: Value,
        #[case] expected: &str,
    ) {
        let request: ActionRequest =
            serde_json::from_value(json!({"action": "getTasks", "userId": user_id, "data": {}}))
                .unwrap();

        assert_eq!(request.user_id.map(RawId::into_text).as_deref(), Some(expected));
    }

    #[rstest]
    #[case::欠落(Value::Null)]
    #[case::数値(json!(5))]
    #[case::オブジェクト(json!({"name": "getTasks"}))]
    #[case::未知の名前(json!("frobnicate"))]
    fn test_parse_kindは文字列の既知の名前以外を未知のアクションにする(#[case] action: Value) {
        let err = parse_kind(&action).unwrap_err();

        assert!(matches!(err, DataApiError::InvalidAction(_)));
    }

    #[test]
    fn test_parse_kindは既知の名前を変換する() {
        assert_eq!(
            parse_kind(&json!("getTasksByCategoryAndUser")).unwrap(),
            ActionKind::GetTasksByCategoryAndUser
        );
    }

    #[test]
    fn test_require_ownerでuser_idが無いと不正なリクエスト() {
        let err = require_owner(None).unwrap_err();

        assert!(matches!(err, DataApiError::MalformedRequest(msg) if msg.contains("userId")));
    }

    #[test]
    fn test_require_ownerで空のuser_idはドメインエラー() {
        let err = require_owner(Some("")).unwrap_err();

        assert!(matches!(err, DataApiError::Domain(_)));
    }
}
