use crate::storage::{LinkChanges, LinkRecord, NewLinkRow};
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 LinkRecord
pub fn model_to_record(model: link::Model) -> LinkRecord {
    LinkRecord {
        id: model.id,
        user_id: model.user_id,
        alias: model.alias,
        original_url: model.original_url,
        visit_count: model.visit_count.max(0) as u64,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 NewLinkRow 转换为 ActiveModel（用于插入）
pub fn new_row_to_active_model(row: &NewLinkRow, id: &str) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: Set(id.to_string()),
        user_id: Set(row.user_id.clone()),
        alias: Set(row.alias.clone()),
        original_url: Set(row.original_url.clone()),
        visit_count: Set(row.visit_count.min(i64::MAX as u64) as i64),
        created_at: Set(row.created_at),
        updated_at: Set(row.updated_at),
    }
}

/// 将 LinkChanges 转换为 ActiveModel（只设置变更的列）
pub fn changes_to_active_model(changes: &LinkChanges) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        user_id: NotSet,
        alias: match changes.alias {
            Some(ref alias) => Set(alias.clone()),
            None => NotSet,
        },
        original_url: match changes.original_url {
            Some(ref url) => Set(url.clone()),
            None => NotSet,
        },
        visit_count: NotSet,
        created_at: NotSet,
        updated_at: Set(changes.updated_at),
    }
}
