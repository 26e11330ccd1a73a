//! # API レスポンスエンベロープ
//!
//! 成功時の統一レスポンス形式 `{ "success": true, "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 成功レスポンスの統一型
///
/// ディスパッチャが返すすべての成功レスポンスはこの形式になる。
/// `data` が `Option` の場合、`None` は `null` としてシリアライズされる
/// （単一行取得のヒットなしなど）。
///
/// ## 使用例
///
/// ```
/// use taskdeck_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert!(response.success);
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data:    T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serializeを正しいjson形状にする() {
        let response = ApiResponse::new("hello");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "success": true, "data": "hello" }));
    }

    #[test]
    fn test_noneのdataはnullとしてシリアライズされる() {
        let response: ApiResponse<Option<Vec<String>>> = ApiResponse::new(None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "success": true, "data": null }));
    }

    #[test]
    fn test_vecペイロードをシリアライズする() {
        let response = ApiResponse::new(vec!["a", "b", "c"]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "success": true, "data": ["a", "b", "c"] })
        );
    }

    #[test]
    fn test_deserializeでjsonからオブジェクトに変換する() {
        let json = r#"{"success": true, "data": "world"}"#;
        let response: ApiResponse<String> = serde_json::from_str(json).unwrap();

        assert!(response.success);
        assert_eq!(response.data, "world");
    }
}
