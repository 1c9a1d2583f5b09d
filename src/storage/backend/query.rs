//! Read operations for SeaOrmTable

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::converters::model_to_record;
use super::{SeaOrmTable, map_db_err};
use crate::storage::{LinkRecord, StoreResult};

use migration::entities::link;

impl SeaOrmTable {
    pub(super) async fn find_by_owner(&self, owner: &str) -> StoreResult<Vec<LinkRecord>> {
        let models = link::Entity::find()
            .filter(link::Column::UserId.eq(owner))
            .order_by_desc(link::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        debug!("Loaded {} links for owner {}", models.len(), owner);
        Ok(models.into_iter().map(model_to_record).collect())
    }

    pub(super) async fn find_by_id(&self, id: &str) -> StoreResult<Option<LinkRecord>> {
        link::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map(|model| model.map(model_to_record))
            .map_err(map_db_err)
    }

    pub(super) async fn find_ids_by_alias(
        &self,
        alias: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let mut query = link::Entity::find()
            .select_only()
            .column(link::Column::Id)
            .filter(link::Column::Alias.eq(alias));

        if let Some(id) = exclude_id {
            query = query.filter(link::Column::Id.ne(id));
        }

        query
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}
