//! # ヘルスチェックハンドラ
//!
//! Data API の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（ストアへの到達性を確認）
//! - `/api/test`: フロントエンド向けの疎通確認（メソッドと URL をそのまま返す）
//!
//! レスポンス型は [`taskdeck_shared::HealthResponse`] / [`taskdeck_shared::ReadinessResponse`] /
//! [`taskdeck_shared::ProbeResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use chrono::Utc;
use taskdeck_infra::RowStore;
use taskdeck_shared::{
    CheckStatus,
    HealthResponse,
    ProbeResponse,
    ReadinessResponse,
    ReadinessStatus,
};

/// ストア確認のタイムアウト
const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub store: Arc<dyn RowStore>,
}

/// Readiness Check エンドポイント
///
/// ストアに到達できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert("store".to_string(), check_store(state.store.as_ref()).await);

    let response = ReadinessResponse::from_checks(checks);
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

async fn check_store(store: &dyn RowStore) -> CheckStatus {
    match tokio::time::timeout(STORE_CHECK_TIMEOUT, store.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: store ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: store check timed out");
            CheckStatus::Error
        }
    }
}

/// 疎通確認エンドポイント
///
/// メソッドを問わず 200 を返す。
pub async fn probe(method: Method, uri: Uri) -> Json<ProbeResponse> {
    Json(ProbeResponse::new(
        method.as_str(),
        uri.to_string(),
        Utc::now(),
    ))
}
