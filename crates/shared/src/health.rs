//! # ヘルスチェック共通型
//!
//! Data API のヘルスチェック・疎通確認エンドポイントで使用されるレスポンス型を提供する。

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use taskdeck_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// 疎通確認レスポンス
///
/// フロントエンドが API ルーティングの到達性を確認するためのエンドポイントが返す。
/// リクエストのメソッドと URL をそのまま返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub success:   bool,
    pub message:   String,
    /// ISO 8601（UTC、ミリ秒精度、`Z` 終端）
    pub timestamp: String,
    pub method:    String,
    pub url:       String,
}

impl ProbeResponse {
    /// 疎通確認の固定メッセージ
    pub const MESSAGE: &'static str = "Test API is working";

    /// リクエスト情報と現在時刻から疎通確認レスポンスを作成する
    pub fn new(method: impl Into<String>, url: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            success:   true,
            message:   Self::MESSAGE.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            method:    method.into(),
            url:       url.into(),
        }
    }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// `status` は全体のステータス、`checks` は個別チェック結果を示す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体ステータスを導出する
    ///
    /// 1 つでも `Error` があれば `NotReady` になる。
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_health_responseのserializeで正しいjson形状にする() {
        let response = HealthResponse {
            status:  "healthy".to_string(),
            version: "0.1.0".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "version": "0.1.0"
            })
        );
    }

    #[test]
    fn test_probe_responseはミリ秒精度のz終端タイムスタンプを持つ() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let response = ProbeResponse::new("POST", "/api/test", now);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "message": "Test API is working",
                "timestamp": "2026-01-02T03:04:05.000Z",
                "method": "POST",
                "url": "/api/test"
            })
        );
    }

    #[test]
    fn test_from_checksで全てokならready() {
        let mut checks = HashMap::new();
        checks.insert("store".to_string(), CheckStatus::Ok);

        let response = ReadinessResponse::from_checks(checks);

        assert_eq!(response.status, ReadinessStatus::Ready);
    }

    #[test]
    fn test_from_checksでerrorを含むとnot_ready() {
        let mut checks = HashMap::new();
        checks.insert("store".to_string(), CheckStatus::Error);

        let response = ReadinessResponse::from_checks(checks);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "not_ready");
        assert_eq!(json["checks"]["store"], "error");
    }
}
