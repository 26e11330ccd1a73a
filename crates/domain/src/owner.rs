//! # 所有者
//!
//! 行の所有者を表す識別子。
//!
//! ## 信頼境界
//!
//! `OwnerId` はリクエストボディの `userId`（またはゲストリセットの
//! `guestUserId`）からそのまま作られる。このサービスは署名やトークンを検証せず、
//! 上流の認証層が `userId` を保証している前提で動作する。ここで保証するのは
//! 「空でないこと」と「すべてのクエリに条件として付くこと」だけである。

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{DomainError, record::RawId};

/// 行の所有者 ID
///
/// Task / Category の `owner_id` カラムと比較される。
/// ストア側の型（uuid / text / bigint）に依存しないよう文字列で保持する。
/// JSON では文字列と整数のどちらでも受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(into = "String")]
#[display("{_0}")]
pub struct OwnerId(String);

impl OwnerId {
    /// 所有者 ID を作成する
    ///
    /// 空文字列は拒否する（全行にマッチしないフィルタを黙って発行しないため）。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("所有者 ID は必須です".to_string()));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for OwnerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = RawId::deserialize(deserializer)?.into_text();
        Self::new(text).map_err(serde::de::Error::custom)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_newで空でない文字列を受け付ける() {
        let owner = OwnerId::new("u1").unwrap();

        assert_eq!(owner.as_str(), "u1");
        assert_eq!(owner.to_string(), "u1");
    }

    #[test]
    fn test_newで空文字列を拒否する() {
        assert!(matches!(OwnerId::new(""), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_deserializeでも空文字列を拒否する() {
        let result = serde_json::from_str::<OwnerId>(r#""""#);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserializeで整数を文字列として受け付ける() {
        let owner: OwnerId = serde_json::from_str("42").unwrap();

        assert_eq!(owner.as_str(), "42");
    }

    #[test]
    fn test_serializeはプレーンな文字列になる() {
        let owner = OwnerId::new("g1").unwrap();

        assert_eq!(serde_json::to_value(&owner).unwrap(), serde_json::json!("g1"));
    }
}
