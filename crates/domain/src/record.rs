//! # レコード
//!
//! ストア上の 1 行と、その識別に使う型を定義する。
//!
//! Task / Category のカラム構成はストアのスキーマが決める。このサービスは
//! 呼び出し元が渡したフィールドをそのまま通すため、行は型付き構造体ではなく
//! JSON オブジェクトとして扱う。型で保証するのは `owner_id` の扱いだけである。

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{DomainError, owner::OwnerId};

/// カラム名
pub mod columns {
    pub const ID: &str = "id";
    pub const OWNER_ID: &str = "owner_id";
    pub const CATEGORY_ID: &str = "category_id";
    pub const CREATED_AT: &str = "created_at";
    pub const SUGGESTIBLE_AT: &str = "suggestible_at";
    pub const DEFERRAL: &str = "deferral";
    pub const FINISHED: &str = "finished";
}

/// 操作対象のテーブル
///
/// 表示名はストア上のテーブル名そのもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Table {
    #[strum(serialize = "Tasks")]
    Tasks,
    #[strum(serialize = "Categories")]
    Categories,
}

/// 行 ID
///
/// ストアの主キーは text / uuid / bigint のいずれでもありうるため、
/// JSON の文字列と整数の両方を受け付け、内部ではテキスト表現で保持する。
/// `eq` フィルタの値としてのみ使われる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(into = "String")]
#[display("{_0}")]
pub struct RecordId(String);

/// JSON 上の識別子（文字列または整数）
///
/// 行 ID と所有者 ID の両方がこの形で届く。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Integer(i64),
}

impl RawId {
    /// テキスト表現に変換する
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Integer(n) => n.to_string(),
        }
    }
}

impl RecordId {
    /// 行 ID を作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("行 ID は必須です".to_string()));
        }
        Ok(Self(value))
    }

    /// テキスト表現を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = RawId::deserialize(deserializer)?.into_text();
        Self::new(text).map_err(serde::de::Error::custom)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// ストア上の 1 行（カラム名 → 値）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// 空のレコードを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 値からレコードを作成する
    ///
    /// `null` は空のレコードとして扱う。オブジェクト以外は拒否する。
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::Validation(format!(
                "オブジェクトが必要です: {}",
                json_type_name(&other)
            ))),
        }
    }

    /// `owner_id` を指定の所有者で上書きする
    ///
    /// 呼び出し元がフィールドに `owner_id` を含めていても、必ずこちらが勝つ。
    pub fn with_owner(mut self, owner: &OwnerId) -> Self {
        self.0.insert(
            columns::OWNER_ID.to_string(),
            Value::String(owner.as_str().to_string()),
        );
        self
    }

    /// 指定カラムを取り除く
    pub fn without(mut self, column: &str) -> Self {
        self.0.remove(column);
        self
    }

    /// カラムの値を設定する
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    /// カラムの値を取得する
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// カラムが存在するか
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// 別のレコードの全カラムをこのレコードへ上書きマージする
    pub fn merge(&mut self, changes: &Record) {
        for (column, value) in &changes.0 {
            self.0.insert(column.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
