//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込み・ストア生成とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{any, get},
};
use taskdeck_infra::RowStore;
use taskdeck_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{DispatchState, ReadinessState, dispatch, health_check, probe, readiness_check},
    usecase::{CategoryUseCaseImpl, TaskUseCaseImpl},
};

/// State の構築とルーター定義を行う
///
/// ストアはプロセスで 1 つだけ生成されたものを受け取り、全 State で共有する。
pub fn build_app(store: Arc<dyn RowStore>) -> Router {
    let dispatch_state = Arc::new(DispatchState {
        tasks:      TaskUseCaseImpl::new(store.clone()),
        categories: CategoryUseCaseImpl::new(store.clone()),
    });
    let readiness_state = Arc::new(ReadinessState { store });

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/test", any(probe))
        .merge(
            Router::new()
                .route("/api", any(dispatch))
                .route("/api/index", any(dispatch))
                .with_state(dispatch_state),
        )
        // Request ID / CORS レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. CorsLayer（最外）: OPTIONS はここで 200・空ボディを返す。他の応答にも CORS ヘッダーを付ける
        // 2. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
        // 3. TraceLayer: request_id を含むスパンで全ログを囲む
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
}

/// 全オリジンを許可する CORS レイヤー
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
