//! # ドメイン層エラー定義
//!
//! リクエストの解釈で発生するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `UnknownAction` | 400 Bad Request | 受け付けないアクション名 |
//! | `Validation` | 500 Internal Server Error | `data` / `userId` の形が不正 |
//!
//! `Validation` が 400 でないのは、ボディ形状の不正を個別に扱わず
//! 汎用の失敗経路に流すという API 契約のため。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須パラメータの欠落、型の不一致、空の所有者 ID など。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 未知のアクション
    #[error("未知のアクションです: {0}")]
    UnknownAction(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validationのメッセージにプレフィックスが付く() {
        let err = DomainError::Validation("taskId は必須です".to_string());

        assert_eq!(err.to_string(), "バリデーションエラー: taskId は必須です");
    }

    #[test]
    fn test_unknown_actionのメッセージにアクション名が含まれる() {
        let err = DomainError::UnknownAction("frobnicate".to_string());

        assert!(err.to_string().contains("frobnicate"));
    }
}
