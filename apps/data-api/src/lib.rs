//! # Data API ライブラリ
//!
//! タスク管理クライアント向けのデータ API のコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app`: State の構築とルーター定義
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: テーブルごとのストア操作

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

pub use app::build_app;
