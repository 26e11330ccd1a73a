//! # ストア
//!
//! 行の読み書きを抽象化するトレイトとその実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: Data API はトレイトにのみ依存し、実装は起動時に注入する
//! - **1 リクエスト 1 呼び出し**: トレイトのメソッドはそれぞれストアへの
//!   1 回の操作に対応し、複数操作にまたがるトランザクションは持たない
//! - **テスタビリティ**: [`InMemoryRowStore`] で外部依存なしにテストできる

pub mod memory;
pub mod postgrest;

use async_trait::async_trait;
pub use memory::InMemoryRowStore;
pub use postgrest::PostgrestStore;
use taskdeck_domain::{
    query::{Query, Returning},
    record::{Record, Table},
};

use crate::error::InfraError;

/// 行ストアトレイト
///
/// `Arc<dyn RowStore>` としてプロセスで 1 つだけ生成し、リクエスト間で共有する。
#[async_trait]
pub trait RowStore: Send + Sync {
    /// 条件に一致する行を取得する（並び順を反映）
    async fn select(&self, query: &Query) -> Result<Vec<Record>, InfraError>;

    /// 条件に一致する行を 1 件取得する
    ///
    /// 一致が 0 件（または 1 件に絞れない）場合は `None` を返し、エラーにしない。
    async fn select_single(&self, query: &Query) -> Result<Option<Record>, InfraError>;

    /// 行を挿入し、挿入された行を返す
    async fn insert(&self, table: Table, record: Record) -> Result<Vec<Record>, InfraError>;

    /// 条件に一致する行を更新する
    ///
    /// [`Returning::Minimal`] の場合は常に空の `Vec` を返す。
    async fn update(
        &self,
        query: &Query,
        changes: Record,
        returning: Returning,
    ) -> Result<Vec<Record>, InfraError>;

    /// 条件に一致する行を削除し、削除された行を返す
    async fn delete(&self, query: &Query) -> Result<Vec<Record>, InfraError>;

    /// ストアに到達できるか確認する（Readiness Check 用）
    async fn ping(&self) -> Result<(), InfraError>;
}
