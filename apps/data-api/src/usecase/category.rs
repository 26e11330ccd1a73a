//! # カテゴリユースケース

use std::sync::Arc;

use taskdeck_domain::{
    owner::OwnerId,
    query::Query,
    record::{Record, RecordId, Table, columns},
};
use taskdeck_infra::RowStore;

use crate::error::DataApiError;

/// カテゴリユースケース実装
pub struct CategoryUseCaseImpl {
    store: Arc<dyn RowStore>,
}

impl CategoryUseCaseImpl {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// 自分のカテゴリ一覧を作成日時の降順で取得する
    #[tracing::instrument(skip_all, level = "debug", fields(%owner))]
    pub async fn list_categories(&self, owner: &OwnerId) -> Result<Vec<Record>, DataApiError> {
        let query = Query::owned_by(Table::Categories, owner).order_desc(columns::CREATED_AT);

        let rows = self.store.select(&query).await?;
        tracing::debug!(count = rows.len(), "カテゴリ一覧を取得しました");

        Ok(rows)
    }

    /// カテゴリを作成する
    ///
    /// `owner_id` は常にリクエストの所有者になる。
    #[tracing::instrument(skip_all, level = "debug", fields(%owner))]
    pub async fn create_category(
        &self,
        owner: &OwnerId,
        fields: Record,
    ) -> Result<Vec<Record>, DataApiError> {
        let rows = self
            .store
            .insert(Table::Categories, fields.with_owner(owner))
            .await?;

        Ok(rows)
    }

    /// カテゴリを削除し、削除された行を返す
    ///
    /// 所属するタスクには触れない。
    #[tracing::instrument(skip_all, level = "debug", fields(%owner, %category_id))]
    pub async fn delete_category(
        &self,
        owner: &OwnerId,
        category_id: &RecordId,
    ) -> Result<Vec<Record>, DataApiError> {
        let query =
            Query::owned_by(Table::Categories, owner).eq(columns::ID, category_id.as_str());

        let rows = self.store.delete(&query).await?;
        tracing::debug!(count = rows.len(), "カテゴリを削除しました");

        Ok(rows)
    }
}
