//! # クエリ記述
//!
//! ストアに発行する select / update / delete の対象行を、ストア実装に依存しない
//! 形で記述する。条件は等値比較（`eq`）のみ。
//!
//! ## 所有者スコープ
//!
//! ユースケースは [`Query::owned_by`] からクエリを組み立てる。これにより
//! `owner_id = <所有者>` が常に最初の条件として入り、他人の行に触れる
//! クエリを構築する手段がユースケース側に残らない。

use crate::{
    owner::OwnerId,
    record::{Table, columns},
};

/// 等値フィルタ（`column = value`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    value:  String,
}

impl Filter {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// 並び順の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// 並び順
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column:    String,
    direction: Direction,
}

impl Order {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// update が影響行を返すかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returning {
    /// 更新後の行を返す
    Representation,
    /// 何も返さない
    Minimal,
}

/// 対象テーブル・フィルタ・並び順の組
///
/// ## 使用例
///
/// ```rust
/// use taskdeck_domain::{
///     owner::OwnerId,
///     query::Query,
///     record::{Table, columns},
/// };
///
/// let owner = OwnerId::new("u1").unwrap();
/// let query = Query::owned_by(Table::Tasks, &owner).eq(columns::ID, "t1");
///
/// assert_eq!(query.filters().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table:   Table,
    filters: Vec<Filter>,
    order:   Option<Order>,
}

impl Query {
    /// 条件なしのクエリを作成する
    pub fn table(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: None,
        }
    }

    /// 所有者で絞り込んだクエリを作成する
    pub fn owned_by(table: Table, owner: &OwnerId) -> Self {
        Self::table(table).eq(columns::OWNER_ID, owner.as_str())
    }

    /// 等値条件を追加する
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value:  value.into(),
        });
        self
    }

    /// 降順の並び順を設定する
    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(column, Direction::Descending)
    }

    /// 昇順の並び順を設定する
    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(column, Direction::Ascending)
    }

    fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn table_name(&self) -> Table {
        self.table
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }
}
