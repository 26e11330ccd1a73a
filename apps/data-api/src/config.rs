//! # Data API 設定
//!
//! 環境変数から Data API サーバーの設定を読み込む。

use std::{env, fmt};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// ポート番号として解釈できない
    #[error("DATA_API_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    /// 未知のストアバックエンド
    #[error("STORE_BACKEND は postgrest または memory である必要があります: {0}")]
    UnknownBackend(String),
}

/// ストアの接続設定
#[derive(Clone)]
pub enum StoreConfig {
    /// ホスティングされたデータベースの REST ゲートウェイ
    Postgrest {
        /// プロジェクト URL
        url:              String,
        /// サービスロールキー
        service_role_key: String,
    },
    /// プロセス内メモリ（ローカル開発用）
    Memory,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgrest { url, .. } => f
                .debug_struct("Postgrest")
                .field("url", url)
                .field("service_role_key", &"[REDACTED]")
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Data API サーバーの設定
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    /// バインドアドレス
    pub host:  String,
    /// ポート番号
    pub port:  u16,
    /// ストア設定
    pub store: StoreConfig,
}

impl DataApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定と同じに扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let host = get("DATA_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("DATA_API_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = match get("STORE_BACKEND").as_deref() {
            None | Some("postgrest") => StoreConfig::Postgrest {
                url:              get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                service_role_key: get("SUPABASE_SERVICE_ROLE_KEY")
                    .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?,
            },
            Some("memory") => StoreConfig::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self { host, port, store })
    }
}
