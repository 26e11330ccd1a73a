//! # ユースケース層
//!
//! アクションごとのストア操作を実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: ストアを `Arc<dyn RowStore>` で外部から注入
//! - **所有者スコープ**: クエリは必ず [`Query::owned_by`](taskdeck_domain::query::Query::owned_by)
//!   から組み立てる
//! - **1 アクション 1 操作**: 各メソッドはストアを 1 回だけ呼ぶ
//!
//! ## モジュール構成
//!
//! - `task`: Tasks テーブルのユースケース
//! - `category`: Categories テーブルのユースケース

pub mod category;
pub mod task;

pub use category::CategoryUseCaseImpl;
pub use task::TaskUseCaseImpl;
