//! # PostgREST ストア
//!
//! ホスティングされた PostgreSQL を、その REST ゲートウェイ（PostgREST）経由で
//! 操作する [`RowStore`] 実装。
//!
//! ## 接続
//!
//! - エンドポイント: `{プロジェクト URL}/rest/v1/{テーブル名}`
//! - 認証: サービスロールキーを `apikey` と `Authorization: Bearer` の両方で送る。
//!   サービスロールは行レベルセキュリティをバイパスするため、所有者による
//!   絞り込みはクエリ側（[`Query::owned_by`]）で必ず行う
//!
//! ## クエリの対応
//!
//! | 操作 | メソッド | 主なパラメータ／ヘッダー |
//! |------|---------|------------------------|
//! | select | GET | `select=*`, `{col}=eq.{値}`, `order={col}.desc` |
//! | select_single | GET | 上記 + `Accept: application/vnd.pgrst.object+json` |
//! | insert | POST | `Prefer: return=representation` |
//! | update | PATCH | `Prefer: return=representation` または `return=minimal` |
//! | delete | DELETE | `Prefer: return=representation` |

use std::fmt;

use async_trait::async_trait;
use reqwest::{
    Method,
    RequestBuilder,
    StatusCode,
    header::ACCEPT,
};
use serde::{Deserialize, de::DeserializeOwned};
use taskdeck_domain::{
    query::{Direction, Query, Returning},
    record::{Record, Table},
};

use super::RowStore;
use crate::error::{InfraError, StoreFailure};

/// REST ゲートウェイのパス
const REST_PATH: &str = "/rest/v1";

/// 単一オブジェクトを要求するメディアタイプ
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

const APIKEY: &str = "apikey";
const PREFER: &str = "prefer";

const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// PostgREST 実装の RowStore
#[derive(Clone)]
pub struct PostgrestStore {
    rest_url:    String,
    service_key: String,
    client:      reqwest::Client,
}

impl PostgrestStore {
    /// 新しいストアを作成する
    ///
    /// # 引数
    ///
    /// - `project_url`: プロジェクト URL（例: `https://xyz.supabase.co`）
    /// - `service_key`: サービスロールキー
    pub fn new(project_url: &str, service_key: impl Into<String>) -> Self {
        Self::with_client(project_url, service_key, reqwest::Client::new())
    }

    /// HTTP クライアントを指定してストアを作成する
    pub fn with_client(
        project_url: &str,
        service_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            rest_url: format!("{}{}", project_url.trim_end_matches('/'), REST_PATH),
            service_key: service_key.into(),
            client,
        }
    }

    /// REST ゲートウェイのベース URL
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn table_url(&self, table: Table, query_string: &str) -> String {
        if query_string.is_empty() {
            format!("{}/{}", self.rest_url, table)
        } else {
            format!("{}/{}?{}", self.rest_url, table, query_string)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(APIKEY, &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

impl fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.rest_url)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl RowStore for PostgrestStore {
    #[tracing::instrument(skip_all, level = "debug", fields(table = %query.table_name()))]
    async fn select(&self, query: &Query) -> Result<Vec<Record>, InfraError> {
        let url = self.table_url(query.table_name(), &query_string(query, true));

        let response = self.request(Method::GET, &url).send().await?;
        let rows: Vec<Record> = read_json(response).await?;

        tracing::debug!(rows = rows.len(), "select 完了");
        Ok(rows)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %query.table_name()))]
    async fn select_single(&self, query: &Query) -> Result<Option<Record>, InfraError> {
        let url = self.table_url(query.table_name(), &query_string(query, true));

        let response = self
            .request(Method::GET, &url)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        into_optional(read_json(response).await)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%table))]
    async fn insert(&self, table: Table, record: Record) -> Result<Vec<Record>, InfraError> {
        let url = self.table_url(table, &query_string(&Query::table(table), true));

        let response = self
            .request(Method::POST, &url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&record)
            .send()
            .await?;

        read_json(response).await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %query.table_name(), ?returning))]
    async fn update(
        &self,
        query: &Query,
        changes: Record,
        returning: Returning,
    ) -> Result<Vec<Record>, InfraError> {
        match returning {
            Returning::Representation => {
                let url = self.table_url(query.table_name(), &query_string(query, true));
                let response = self
                    .request(Method::PATCH, &url)
                    .header(PREFER, RETURN_REPRESENTATION)
                    .json(&changes)
                    .send()
                    .await?;
                let rows: Vec<Record> = read_json(response).await?;
                tracing::debug!(rows = rows.len(), "update 完了");
                Ok(rows)
            }
            Returning::Minimal => {
                let url = self.table_url(query.table_name(), &query_string(query, false));
                let response = self
                    .request(Method::PATCH, &url)
                    .header(PREFER, RETURN_MINIMAL)
                    .json(&changes)
                    .send()
                    .await?;
                expect_success(response).await?;
                Ok(Vec::new())
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(table = %query.table_name()))]
    async fn delete(&self, query: &Query) -> Result<Vec<Record>, InfraError> {
        let url = self.table_url(query.table_name(), &query_string(query, true));

        let response = self
            .request(Method::DELETE, &url)
            .header(PREFER, RETURN_REPRESENTATION)
            .send()
            .await?;

        let rows: Vec<Record> = read_json(response).await?;
        tracing::debug!(rows = rows.len(), "delete 完了");
        Ok(rows)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn ping(&self) -> Result<(), InfraError> {
        let url = format!("{}/", self.rest_url);
        let response = self.request(Method::GET, &url).send().await?;
        expect_success(response).await
    }
}

/// クエリをゲートウェイのクエリ文字列に変換する
///
/// 値は URL エンコードする。`select_all` が真なら先頭に `select=*` を付ける。
pub fn query_string(query: &Query, select_all: bool) -> String {
    let mut params = Vec::with_capacity(query.filters().len() + 2);

    if select_all {
        params.push("select=*".to_string());
    }

    for filter in query.filters() {
        params.push(format!(
            "{}=eq.{}",
            urlencoding::encode(filter.column()),
            urlencoding::encode(filter.value())
        ));
    }

    if let Some(order) = query.order() {
        let direction = match order.direction() {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        params.push(format!(
            "order={}.{}",
            urlencoding::encode(order.column()),
            direction
        ));
    }

    params.join("&")
}

/// ゲートウェイのエラーボディ
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    code:    Option<String>,
    message: String,
    details: Option<String>,
    hint:    Option<String>,
}

/// 成功レスポンスを JSON としてデコードする
///
/// 失敗レスポンスは [`decode_failure`] でストアエラーに変換する。
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, InfraError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(decode_failure(status, &body))
}

/// ボディを読まずに成功を確認する
async fn expect_success(response: reqwest::Response) -> Result<(), InfraError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(decode_failure(status, &body))
}

/// 失敗レスポンスのボディをストアエラーに変換する
///
/// ゲートウェイ形式（`{code, message, details, hint}`）でなければ、
/// ステータスと生のボディをメッセージにする。
fn decode_failure(status: StatusCode, body: &str) -> InfraError {
    match serde_json::from_str::<GatewayErrorBody>(body) {
        Ok(error) => InfraError::store(StoreFailure {
            status:  status.as_u16(),
            code:    error.code,
            message: error.message,
            details: error.details,
            hint:    error.hint,
        }),
        Err(_) => InfraError::store(StoreFailure {
            status:  status.as_u16(),
            code:    None,
            message: format!("予期しないステータス {}: {}", status, body),
            details: None,
            hint:    None,
        }),
    }
}

/// 単一行取得の結果を `Option` に正規化する
///
/// 0 行（または複数行）を示す `PGRST116` は `None` にし、それ以外のエラーは伝播する。
fn into_optional(result: Result<Record, InfraError>) -> Result<Option<Record>, InfraError> {
    match result {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_no_single_row() => {
            tracing::debug!("一致する行がありません");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use taskdeck_domain::{owner::OwnerId, record::columns};

    use super::*;
    use crate::InfraErrorKind;

    /// テスト用の HTTP レスポンスを構築する
    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    fn owner() -> OwnerId {
        OwnerId::new("u1").unwrap()
    }

    // ===== URL 組み立て =====

    #[test]
    fn test_newでrest_urlを組み立て末尾スラッシュを除く() {
        let store = PostgrestStore::new("https://xyz.supabase.co/", "key");

        assert_eq!(store.rest_url(), "https://xyz.supabase.co/rest/v1");
    }

    #[test]
    fn test_table_urlはテーブル名とクエリ文字列を連結する() {
        let store = PostgrestStore::new("https://xyz.supabase.co", "key");

        assert_eq!(
            store.table_url(Table::Categories, "select=*"),
            "https://xyz.supabase.co/rest/v1/Categories?select=*"
        );
        assert_eq!(
            store.table_url(Table::Tasks, ""),
            "https://xyz.supabase.co/rest/v1/Tasks"
        );
    }

    #[test]
    fn test_debug出力にサービスロールキーを含めない() {
        let store = PostgrestStore::new("https://xyz.supabase.co", "super-secret");

        let debug = format!("{store:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    // ===== クエリ文字列 =====

    #[test]
    fn test_query_stringはフィルタと降順を符号化する() {
        let query = Query::owned_by(Table::Tasks, &owner())
            .eq(columns::CATEGORY_ID, "c1")
            .order_desc(columns::CREATED_AT);

        assert_eq!(
            query_string(&query, true),
            "select=*&owner_id=eq.u1&category_id=eq.c1&order=created_at.desc"
        );
    }

    #[test]
    fn test_query_stringは値をurlエンコードする() {
        let query = Query::owned_by(Table::Tasks, &OwnerId::new("a&b=c d").unwrap());

        assert_eq!(query_string(&query, false), "owner_id=eq.a%26b%3Dc%20d");
    }

    #[test]
    fn test_query_stringで昇順を符号化する() {
        let query = Query::table(Table::Categories).order_asc(columns::ID);

        assert_eq!(query_string(&query, false), "order=id.asc");
    }

    #[test]
    fn test_query_stringで条件なしselectはselectのみ() {
        assert_eq!(query_string(&Query::table(Table::Tasks), true), "select=*");
    }

    // ===== レスポンス処理 =====

    #[tokio::test]
    async fn test_read_jsonで成功レスポンスを行の配列にデコードする() {
        let response = make_response(200, r#"[{"id": "t1", "owner_id": "u1"}]"#);

        let rows: Vec<Record> = read_json(response).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("id"), Some(&json!("t1")));
    }

    #[tokio::test]
    async fn test_read_jsonでゲートウェイのエラーボディをストアエラーにする() {
        let response = make_response(
            400,
            r#"{"code": "22P02", "message": "invalid input syntax for type uuid: \"nonexistent\"", "details": null, "hint": null}"#,
        );

        let err = read_json::<Vec<Record>>(response).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid input syntax for type uuid: \"nonexistent\""
        );
        assert_eq!(err.store_code(), Some("22P02"));
        assert!(matches!(
            err.kind(),
            InfraErrorKind::Store { status: 400, .. }
        ));
    }

    #[tokio::test]
    async fn test_read_jsonでゲートウェイ形式でないボディはステータスを含むメッセージにする() {
        let response = make_response(502, "Bad Gateway");

        let err = read_json::<Vec<Record>>(response).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("502"), "メッセージにステータスが含まれること: {msg}");
        assert!(msg.contains("Bad Gateway"));
        assert_eq!(err.store_code(), None);
    }

    #[tokio::test]
    async fn test_expect_successで204は成功() {
        let response = make_response(204, "");

        assert!(expect_success(response).await.is_ok());
    }

    #[tokio::test]
    async fn test_単一行取得のpgrst116はnoneになる() {
        let response = make_response(
            406,
            r#"{"code": "PGRST116", "message": "JSON object requested, multiple (or no) rows returned", "details": "The result contains 0 rows", "hint": null}"#,
        );

        let result = into_optional(read_json(response).await).unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_単一行取得の成功はsomeになる() {
        let response = make_response(200, r#"{"id": "t1", "owner_id": "u1"}"#);

        let result = into_optional(read_json(response).await).unwrap();

        assert_eq!(result.unwrap().get("owner_id"), Some(&json!("u1")));
    }

    #[tokio::test]
    async fn test_単一行取得のその他のエラーは伝播する() {
        let response = make_response(
            401,
            r#"{"code": "PGRST301", "message": "JWT expired", "details": null, "hint": null}"#,
        );

        let err = into_optional(read_json(response).await).unwrap_err();

        assert_eq!(err.to_string(), "JWT expired");
    }
}
