//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス `{ "error": "<message>" }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - クライアントが文字列一致で判定するメッセージは定数で持つ

use serde::{Deserialize, Serialize};

/// 未知のアクションに対するエラーメッセージ
pub const INVALID_ACTION: &str = "Invalid action";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 任意のメッセージでエラーレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// 400 Invalid action
    pub fn invalid_action() -> Self {
        Self::new(INVALID_ACTION)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_invalid_actionが固定メッセージを返す() {
        let error = ErrorResponse::invalid_action();

        assert_eq!(error.error, "Invalid action");
    }

    #[test]
    fn test_jsonシリアライズでerrorフィールドのみを持つ() {
        let error = ErrorResponse::new("relation \"Tasks\" does not exist");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "error": "relation \"Tasks\" does not exist" })
        );
    }
}
