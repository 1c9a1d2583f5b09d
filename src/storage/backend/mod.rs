//! SeaORM link table
//!
//! This module provides the `links` table on SQLite, MySQL/MariaDB, and
//! PostgreSQL through SeaORM. Schema lives in the `migration` crate.

mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::warn;

use crate::errors::{LinkdashError, Result};
use crate::storage::{StoreError, StoreErrorCode};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{changes_to_active_model, model_to_record, new_row_to_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkdashError::database_config(format!(
            "Cannot infer store type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://, http(s)://, memory",
            database_url
        )))
    }
}

/// 将 DbErr 映射为带错误码的 StoreError
///
/// 唯一约束冲突必须被识别出来，服务层依赖它把写入时的竞争转换为 DuplicateAlias。
pub fn map_db_err(err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
        return StoreError::unique_violation(msg);
    }

    let message = err.to_string();
    // 回退到字符串匹配（驱动未给出结构化错误码时）
    let lower = message.to_lowercase();
    if lower.contains("unique constraint")
        || lower.contains("duplicate key")
        || lower.contains("duplicate entry")
    {
        return StoreError::unique_violation(message);
    }

    let code = match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreErrorCode::Transport,
        DbErr::RecordNotFound(_) => StoreErrorCode::NotFound,
        _ => StoreErrorCode::Other,
    };
    StoreError::new(code, message)
}

/// SeaORM-based link table
#[derive(Clone)]
pub struct SeaOrmTable {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmTable {
    pub async fn new(database_url: &str, backend_name: &str, pool_size: u32) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkdashError::database_config("store.url is not set"));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, pool_size).await?
        };

        // 运行迁移
        run_migrations(&db).await?;

        if backend_name == "mysql" {
            warn!("MySQL compares aliases case-insensitively under its default collation");
        }

        Ok(SeaOrmTable {
            db,
            backend_name: backend_name.to_string(),
        })
    }

    /// Wrap an already-migrated connection.
    pub fn from_connection(db: DatabaseConnection, backend_name: &str) -> Self {
        SeaOrmTable {
            db,
            backend_name: backend_name.to_string(),
        }
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://links.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("links.sqlite").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("postgresql://h/db").unwrap(), "postgres");
        assert!(infer_backend_from_url("redis://h").is_err());
    }

    #[test]
    fn test_map_db_err_message_fallback() {
        let err = DbErr::Custom("UNIQUE constraint failed: links.alias".to_string());
        assert!(map_db_err(err).is_unique_violation());

        let err = DbErr::Custom("duplicate key value violates unique constraint".to_string());
        assert!(map_db_err(err).is_unique_violation());
    }

    #[test]
    fn test_map_db_err_other_codes() {
        let err = DbErr::RecordNotFound("links".to_string());
        assert_eq!(map_db_err(err).code, StoreErrorCode::NotFound);

        let err = DbErr::Custom("syntax error".to_string());
        assert_eq!(map_db_err(err).code, StoreErrorCode::Other);
    }
}
