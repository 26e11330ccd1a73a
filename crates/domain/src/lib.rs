//! # TaskDeck ドメイン層
//!
//! Data API が扱うデータとリクエストの型を定義する。
//!
//! ## 設計方針
//!
//! Task / Category の行スキーマはストア側が所有する。このクレートは行を
//! 任意の JSON オブジェクト（[`record::Record`]）として扱い、代わりに
//! 「どの行に触れてよいか」を型で表現する:
//!
//! - **所有者スコープ**: [`owner::OwnerId`] と [`query::Query::owned_by`] により、
//!   すべての読み書きに `owner_id` 条件が付く
//! - **閉じたアクション集合**: [`action::Action`] は受け付ける操作を列挙型で持ち、
//!   ディスパッチの網羅性をコンパイラが検査する
//!
//! ## 依存関係の方向
//!
//! ```text
//! data-api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（HTTP クライアント、ストア実装）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use taskdeck_domain::{
//!     owner::OwnerId,
//!     query::Query,
//!     record::{Table, columns},
//! };
//!
//! let owner = OwnerId::new("u1").unwrap();
//! let query = Query::owned_by(Table::Tasks, &owner).order_desc(columns::CREATED_AT);
//!
//! assert_eq!(query.filters()[0].column(), "owner_id");
//! ```

pub mod action;
pub mod error;
pub mod owner;
pub mod query;
pub mod record;

pub use error::DomainError;
