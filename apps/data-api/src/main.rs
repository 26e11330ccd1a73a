//! # Data API サーバー
//!
//! タスク管理クライアントからの CRUD リクエストを、ホスティングされた
//! データベースへ中継する API サーバー。
//!
//! ## 役割
//!
//! - **アクションディスパッチ**: `{ action, data, userId }` を 1 回のストア操作に変換
//! - **所有者スコープ**: すべての操作を `owner_id` で絞り込む
//! - **CORS**: ブラウザからの直接呼び出しを許可する
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │   Browser    │────▶│   Data API   │────▶│ REST ゲートウェイ │
//! │              │     │  port: 3000  │     │   (PostgREST)    │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATA_API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `DATA_API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `STORE_BACKEND` | No | `postgrest`（デフォルト）または `memory` |
//! | `SUPABASE_URL` | postgrest 時 **Yes** | プロジェクト URL |
//! | `SUPABASE_SERVICE_ROLE_KEY` | postgrest 時 **Yes** | サービスロールキー |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（インメモリストア）
//! STORE_BACKEND=memory cargo run -p taskdeck-data-api
//!
//! # 本番環境
//! SUPABASE_URL=https://... SUPABASE_SERVICE_ROLE_KEY=... cargo run -p taskdeck-data-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use taskdeck_data_api::{
    build_app,
    config::{DataApiConfig, StoreConfig},
};
use taskdeck_infra::{InMemoryRowStore, PostgrestStore, RowStore};
use taskdeck_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Data API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ストアの生成とルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("data-api");
    let service = tracing_config.service_name.clone();
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = %service).entered();

    // 設定読み込み
    let config = DataApiConfig::from_env()?;

    tracing::info!(
        "Data API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // ストアはプロセスで 1 つだけ生成する
    let store: Arc<dyn RowStore> = match &config.store {
        StoreConfig::Postgrest {
            url,
            service_role_key,
        } => {
            tracing::info!(url = %url, "PostgREST ストアを使用します");
            Arc::new(PostgrestStore::new(url, service_role_key.clone()))
        }
        StoreConfig::Memory => {
            tracing::warn!("インメモリストアを使用します（プロセス終了でデータは失われます）");
            Arc::new(InMemoryRowStore::new())
        }
    };

    let app = build_app(store);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Data API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
