//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ストア操作はユースケースに委譲

pub mod dispatch;
pub mod health;

pub use dispatch::{ActionRequest, DispatchState, dispatch};
pub use health::{ReadinessState, health_check, probe, readiness_check};
