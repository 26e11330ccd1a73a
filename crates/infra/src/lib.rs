//! # TaskDeck インフラ層
//!
//! 外部ストアとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ストアへのアクセスは [`store::RowStore`] トレイトに集約する。Data API は
//! `Arc<dyn RowStore>` を受け取るだけで、背後がホスティングされた
//! データベースの REST ゲートウェイか、プロセス内のメモリかを知らない。
//!
//! ## 責務
//!
//! - **ストアトレイト**: select / select_single / insert / update / delete / ping
//! - **PostgREST 実装**: サービスロールキーでゲートウェイに接続する
//! - **インメモリ実装**: ローカル開発とテストで使う
//!
//! ## 依存関係
//!
//! ```text
//! data-api → infra → domain
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use taskdeck_infra::store::{PostgrestStore, RowStore};
//!
//! let store: Arc<dyn RowStore> = Arc::new(PostgrestStore::new(
//!     "https://project.supabase.co",
//!     service_role_key,
//! ));
//! ```

pub mod error;
pub mod store;

pub use error::{InfraError, InfraErrorKind};
pub use store::{InMemoryRowStore, PostgrestStore, RowStore};
