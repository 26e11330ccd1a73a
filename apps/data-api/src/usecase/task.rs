//! # タスクユースケース
//!
//! Tasks テーブルに対する取得・作成・更新・削除と、ゲストのリセットを実装する。

use std::sync::Arc;

use serde_json::Value;
use taskdeck_domain::{
    owner::OwnerId,
    query::{Query, Returning},
    record::{Record, RecordId, Table, columns},
};
use taskdeck_infra::RowStore;

use crate::error::DataApiError;

/// タスクユースケース実装
pub struct TaskUseCaseImpl {
    store: Arc<dyn RowStore>,
}

impl TaskUseCaseImpl {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }

    /// タスクを 1 件取得する
    ///
    /// 見つかれば 1 要素の配列、見つからなければ `None` を返す。
    #[tracing::instrument(skip_all, level = "debug", fields(%owner, %task_id))]
    pub async fn get_task(
        &self,
        owner: &OwnerId,
        task_id: &RecordId,
    ) -> Result<Option<Vec<Record>>, DataApiError> {
        let query = Query::owned_by(Table::Tasks, owner).eq(columns::ID, task_id.as_str());

        let row = self.store.select_single(&query).await?;

        Ok(row.map(|row| vec![row]))
    }

    /// 自分のタスク一覧を作成日時の降順で取得する
    #[tracing::instrument(skip_all, level = "debug", fields(%owner))]
    pub async fn list_tasks(&self, owner: &OwnerId) -> Result<Vec<Record>, DataApiError> {
        let query = Query::owned_by(Table::Tasks, owner).order_desc(columns::CREATED_AT);

        let rows = self.store.select(&query).await?;
        tracing::debug!(count = rows.len(), "タスク一覧を取得しました");

        Ok(rows)
    }

    /// カテゴリに属する自分のタスク一覧を作成日時の降順で取得する
    #[tracing::instrument(skip_all, level = "debug", fields(%owner, %category_id))]
    pub async fn list_tasks_by_category(
        &self,
        owner: &OwnerId,
        category_id: &RecordId,
    ) -> Result<Vec<Record>, DataApiError> {
        let query = Query::owned_by(Table::Tasks, owner)
            .eq(columns::CATEGORY_ID, category_id.as_str())
            .order_desc(columns::CREATED_AT);

        let rows = self.store.select(&query).await?;
        tracing::debug!(count = rows.len(), "カテゴリ別タスク一覧を取得しました");

        Ok(rows)
    }

    /// タスクを更新し、更新後の行を返す
    ///
    /// `updates` に含まれる `owner_id` は取り除く。行を自分のスコープの外へ
    /// 移すことはできない。
    #[tracing::instrument(skip_all, level = "debug", fields(%owner, %task_id))]
    pub async fn update_task(
        &self,
        owner: &OwnerId,
        task_id: &RecordId,
        updates: Record,
    ) -> Result<Vec<Record>, DataApiError> {
        let query = Query::owned_by(Table::Tasks, owner).eq(columns::ID, task_id.as_str());
        let changes = updates.without(columns::OWNER_ID);

        let rows = self
            .store
            .update(&query, changes, Returning::Representation)
            .await?;
        tracing::debug!(count = rows.len(), "タスクを更新しました");

        Ok(rows)
    }

    /// ゲストの全タスクの進行状態をリセットする
    ///
    /// `suggestible_at` と `deferral` を `null`、`finished` を `false` にする。
    /// 何度実行しても結果は同じ。
    #[tracing::instrument(skip_all, level = "debug", fields(guest = %guest))]
    pub async fn reset_guest_tasks(&self, guest: &OwnerId) -> Result<(), DataApiError> {
        let query = Query::owned_by(Table::Tasks, guest);
        let changes = Record::new()
            .set(columns::SUGGESTIBLE_AT, Value::Null)
            .set(columns::DEFERRAL, Value::Null)
            .set(columns::FINISHED, false);

        self.store
            .update(&query, changes, Returning::Minimal)
            .await?;

        Ok(())
    }

    /// タスクを作成する
    ///
    /// 呼び出し元が `owner_id` を渡していても、リクエストの所有者で上書きする。
    #[tracing::instrument(skip_all, level = "debug", fields(%owner))]
    pub async fn create_task(
        &self,
        owner: &OwnerId,
        fields: Record,
    ) -> Result<Vec<Record>, DataApiError> {
        let rows = self
            .store
            .insert(Table::Tasks, fields.with_owner(owner))
            .await?;

        Ok(rows)
    }

    /// タスクを削除し、削除された行を返す
    #[tracing::instrument(skip_all, level = "debug", fields(%owner, %task_id))]
    pub async fn delete_task(
        &self,
        owner: &OwnerId,
        task_id: &RecordId,
    ) -> Result<Vec<Record>, DataApiError> {
        let query = Query::owned_by(Table::Tasks, owner).eq(columns::ID, task_id.as_str());

        let rows = self.store.delete(&query).await?;
        tracing::debug!(count = rows.len(), "タスクを削除しました");

        Ok(rows)
    }
}
