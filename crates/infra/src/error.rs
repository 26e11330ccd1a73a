//! # インフラ層エラー定義
//!
//! ストアとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Store, Http, Serialization 等）
//!
//! `From` 実装や convenience constructor でエラーを生成すると、その時点の
//! スパン情報（どのアクション・どのテーブルの操作か）が自動で記録される。
//!
//! ## 表示文字列
//!
//! `Store` 種別の `Display` はゲートウェイが返した `message` そのものになる。
//! クライアントには `{ "error": <message> }` としてこの文字列が届く。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// 単一行取得で 0 行または複数行だったことを示すゲートウェイのエラーコード
pub const NO_SINGLE_ROW_CODE: &str = "PGRST116";

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// ストアがエラーレスポンスを返した
    ///
    /// クエリ失敗、制約違反、権限エラーなど。
    #[error("{message}")]
    Store {
        /// HTTP ステータス
        status:  u16,
        /// ゲートウェイ／データベースのエラーコード（例: `PGRST116`, `23505`）
        code:    Option<String>,
        message: String,
        details: Option<String>,
        hint:    Option<String>,
    },

    /// ストアとの通信失敗
    ///
    /// 接続エラー、タイムアウト、レスポンスボディのデコード失敗など。
    #[error("ストアとの通信に失敗しました: {0}")]
    Http(#[source] reqwest::Error),

    /// シリアライズ/デシリアライズエラー
    #[error("シリアライズエラー: {0}")]
    Serialization(#[source] serde_json::Error),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

/// ストアのエラーレスポンスの内容
#[derive(Debug, Clone, Default)]
pub struct StoreFailure {
    pub status:  u16,
    pub code:    Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint:    Option<String>,
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ストアのエラーコードを取得する
    pub fn store_code(&self) -> Option<&str> {
        match &self.kind {
            InfraErrorKind::Store { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// 単一行取得で 0 行（または複数行）だったか
    pub fn is_no_single_row(&self) -> bool {
        self.store_code() == Some(NO_SINGLE_ROW_CODE)
    }

    // ===== Convenience constructors =====

    /// ストアのエラーレスポンスからエラーを生成する
    pub fn store(failure: StoreFailure) -> Self {
        let StoreFailure {
            status,
            code,
            message,
            details,
            hint,
        } = failure;
        Self {
            kind:       InfraErrorKind::Store {
                status,
                code,
                message,
                details,
                hint,
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Http(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Serialization(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
