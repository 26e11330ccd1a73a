//! # Data API エラー定義
//!
//! Data API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ステータスの対応
//!
//! | バリアント | HTTP ステータス | ボディ |
//! |-----------|----------------|--------|
//! | `InvalidAction` | 400 | `{ "error": "Invalid action" }` |
//! | `MalformedRequest` | 500 | `{ "error": <メッセージ> }` |
//! | `Domain` | 500 | `{ "error": <メッセージ> }` |
//! | `Store` | 500 | `{ "error": <ストアのメッセージ> }` |
//!
//! 未知のアクション以外の失敗はすべて 500 に集約する。ボディ形状の不正に
//! 専用の 400 は設けない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskdeck_domain::DomainError;
use taskdeck_infra::InfraError;
use taskdeck_shared::ErrorResponse;
use thiserror::Error;

/// Data API で発生するエラー
#[derive(Debug, Error)]
pub enum DataApiError {
    /// 受け付けないアクション名
    #[error("未知のアクションです: {0}")]
    InvalidAction(String),

    /// リクエストボディを解釈できない
    #[error("{0}")]
    MalformedRequest(String),

    /// `data` / `userId` の形が不正
    #[error("{0}")]
    Domain(DomainError),

    /// ストアのエラー
    #[error("{0}")]
    Store(#[from] InfraError),
}

impl From<DomainError> for DataApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownAction(name) => Self::InvalidAction(name),
            other => Self::Domain(other),
        }
    }
}

impl IntoResponse for DataApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            DataApiError::InvalidAction(name) => {
                tracing::warn!(action = %name, "未知のアクションを受信しました");
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_action())
            }
            DataApiError::MalformedRequest(msg) => {
                tracing::error!("不正なリクエスト: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(msg.clone()),
                )
            }
            DataApiError::Domain(e) => {
                tracing::error!("パラメータエラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(e.to_string()),
                )
            }
            DataApiError::Store(e) => {
                tracing::error!(
                    error = %e,
                    code = e.store_code(),
                    span_trace = %e.span_trace(),
                    "ストアエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(e.to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
