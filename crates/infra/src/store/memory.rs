//! # インメモリストア
//!
//! プロセス内の `HashMap` に行を保持する [`RowStore`] 実装。
//! ローカル開発（`STORE_BACKEND=memory`）とテストで使う。
//!
//! ## ゲートウェイとの互換性
//!
//! - `eq` フィルタはテキスト表現で比較する（`"7"` は数値の `7` に一致する）
//! - 並び順は安定ソート。`null` と欠損は最大値として扱うため、降順では先頭に来る
//! - insert 時に `id`（UUID v7）と `created_at`（RFC 3339）が無ければ補う
//! - `select_single` は一致が 1 件のときだけ `Some` を返す

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use taskdeck_domain::{
    query::{Direction, Filter, Query, Returning},
    record::{Record, Table, columns},
};
use uuid::Uuid;

use super::RowStore;
use crate::error::InfraError;

type Tables = HashMap<Table, Vec<Record>>;

/// インメモリ実装の RowStore
#[derive(Debug, Clone, Default)]
pub struct InMemoryRowStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定テーブルの全行のスナップショットを取得する（挿入順）
    pub fn rows(&self, table: Table) -> Result<Vec<Record>, InfraError> {
        let tables = self.lock()?;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, InfraError> {
        self.tables
            .lock()
            .map_err(|_| InfraError::unexpected("インメモリストアのロック取得に失敗しました"))
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn select(&self, query: &Query) -> Result<Vec<Record>, InfraError> {
        let tables = self.lock()?;

        let mut rows: Vec<Record> = tables
            .get(&query.table_name())
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_all(row, query.filters()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = query.order() {
            rows.sort_by(|a, b| {
                let ordering = compare_nullable(a.get(order.column()), b.get(order.column()));
                match order.direction() {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        Ok(rows)
    }

    async fn select_single(&self, query: &Query) -> Result<Option<Record>, InfraError> {
        let mut rows = self.select(query).await?;

        if rows.len() == 1 {
            Ok(rows.pop())
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, table: Table, record: Record) -> Result<Vec<Record>, InfraError> {
        let mut record = record;
        if !record.contains(columns::ID) {
            record = record.set(columns::ID, Uuid::now_v7().to_string());
        }
        if !record.contains(columns::CREATED_AT) {
            record = record.set(
                columns::CREATED_AT,
                Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            );
        }

        let mut tables = self.lock()?;
        tables.entry(table).or_default().push(record.clone());

        Ok(vec![record])
    }

    async fn update(
        &self,
        query: &Query,
        changes: Record,
        returning: Returning,
    ) -> Result<Vec<Record>, InfraError> {
        let mut tables = self.lock()?;

        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(&query.table_name()) {
            for row in rows
                .iter_mut()
                .filter(|row| matches_all(row, query.filters()))
            {
                row.merge(&changes);
                updated.push(row.clone());
            }
        }

        match returning {
            Returning::Representation => Ok(updated),
            Returning::Minimal => Ok(Vec::new()),
        }
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Record>, InfraError> {
        let mut tables = self.lock()?;

        let Some(rows) = tables.get_mut(&query.table_name()) else {
            return Ok(Vec::new());
        };

        let (deleted, kept): (Vec<Record>, Vec<Record>) = std::mem::take(rows)
            .into_iter()
            .partition(|row| matches_all(row, query.filters()));
        *rows = kept;

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.lock().map(|_| ())
    }
}

fn matches_all(row: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        row.get(filter.column())
            .is_some_and(|value| text_form(value) == filter.value())
    })
}

/// フィルタ比較に使うテキスト表現
fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `null` と欠損を最大値とみなして比較する
fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => text_form(a).cmp(&text_form(b)),
    }
}
