//! Write operations for SeaOrmTable, and its LinkTable implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{debug, info};

use super::converters::{changes_to_active_model, new_row_to_active_model};
use super::{SeaOrmTable, map_db_err};
use crate::storage::{LinkChanges, LinkRecord, LinkTable, NewLinkRow, StoreResult};

use migration::entities::link;

impl SeaOrmTable {
    async fn insert_row(&self, row: NewLinkRow) -> StoreResult<LinkRecord> {
        let id = uuid::Uuid::new_v4().to_string();
        let active_model = new_row_to_active_model(&row, &id);

        link::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        info!("Link inserted: {} ({})", row.alias, id);
        Ok(row.into_record(id))
    }

    async fn update_row(&self, id: &str, changes: LinkChanges) -> StoreResult<Option<LinkRecord>> {
        let result = link::Entity::update_many()
            .set(changes_to_active_model(&changes))
            .filter(link::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            debug!("Update matched no link with id {}", id);
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete_row(&self, id: &str) -> StoreResult<()> {
        let result = link::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        debug!("Deleted {} row(s) for id {}", result.rows_affected, id);
        Ok(())
    }
}

#[async_trait]
impl LinkTable for SeaOrmTable {
    async fn select_by_owner(&self, owner: &str) -> StoreResult<Vec<LinkRecord>> {
        self.find_by_owner(owner).await
    }

    async fn select_by_id(&self, id: &str) -> StoreResult<Option<LinkRecord>> {
        self.find_by_id(id).await
    }

    async fn select_ids_by_alias(
        &self,
        alias: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        self.find_ids_by_alias(alias, exclude_id).await
    }

    async fn insert(&self, row: NewLinkRow) -> StoreResult<LinkRecord> {
        self.insert_row(row).await
    }

    async fn update(&self, id: &str, changes: LinkChanges) -> StoreResult<Option<LinkRecord>> {
        self.update_row(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.delete_row(id).await
    }

    fn backend_name(&self) -> &'static str {
        match self.backend_name.as_str() {
            "sqlite" => "sqlite",
            "mysql" => "mysql",
            "postgres" => "postgres",
            _ => "sql",
        }
    }
}
