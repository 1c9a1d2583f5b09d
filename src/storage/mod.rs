//! Remote store access
//!
//! The link table lives in an external store. Everything the dashboard needs
//! from it goes through [`LinkTable`]; the concrete tables are:
//! - [`RestTable`]: hosted REST API (PostgREST conventions)
//! - [`SeaOrmTable`]: SQLite / MySQL / PostgreSQL through sea-orm
//! - [`MemoryTable`]: in-process table for tests and demos

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use strum::{AsRefStr, Display};
use tracing::info;

use crate::config::StaticConfig;
use crate::errors::{LinkdashError, Result};

pub mod backend;
pub mod memory;
pub mod models;
pub mod rest;

pub use backend::SeaOrmTable;
pub use memory::MemoryTable;
pub use models::{LinkChanges, LinkRecord, NewLinkRow};
pub use rest::RestTable;

/// Machine-readable failure class reported by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StoreErrorCode {
    UniqueViolation,
    NotFound,
    PermissionDenied,
    Transport,
    Other,
}

/// Error reported by a [`LinkTable`]: a code plus the store's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    pub fn new<T: Into<String>>(code: StoreErrorCode, message: T) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unique_violation<T: Into<String>>(message: T) -> Self {
        Self::new(StoreErrorCode::UniqueViolation, message)
    }

    pub fn transport<T: Into<String>>(message: T) -> Self {
        Self::new(StoreErrorCode::Transport, message)
    }

    pub fn other<T: Into<String>>(message: T) -> Self {
        Self::new(StoreErrorCode::Other, message)
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code == StoreErrorCode::UniqueViolation
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Table-shaped access to the remote `links` table.
#[async_trait]
pub trait LinkTable: Send + Sync {
    /// All rows with `user_id = owner`, ordered by `created_at` descending.
    async fn select_by_owner(&self, owner: &str) -> StoreResult<Vec<LinkRecord>>;

    /// The row with `id = id`, if any.
    async fn select_by_id(&self, id: &str) -> StoreResult<Option<LinkRecord>>;

    /// Ids of rows with `alias = alias` and, when given, `id != exclude_id`.
    async fn select_ids_by_alias(
        &self,
        alias: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Vec<String>>;

    /// Insert a row and return it as stored.
    async fn insert(&self, row: NewLinkRow) -> StoreResult<LinkRecord>;

    /// Apply `changes` to the row with `id = id`. `None` when no row matched.
    async fn update(&self, id: &str, changes: LinkChanges) -> StoreResult<Option<LinkRecord>>;

    /// Delete the row with `id = id`. Deleting a missing row is not an error.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

/// Store kind, inferred from the configured URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Rest,
    Sql,
}

/// 从 store URL 推断存储类型
pub fn infer_store_kind(url: &str) -> Result<StoreKind> {
    if url == "memory" {
        return Ok(StoreKind::Memory);
    }
    if url.starts_with("https://") || url.starts_with("http://") {
        return Ok(StoreKind::Rest);
    }
    backend::infer_backend_from_url(url).map(|_| StoreKind::Sql)
}

pub struct TableFactory;

impl TableFactory {
    /// Build the configured table. SQL stores are connected and migrated here.
    pub async fn create(config: &StaticConfig) -> Result<Arc<dyn LinkTable>> {
        let store = &config.store;
        let table: Arc<dyn LinkTable> = match infer_store_kind(&store.url)? {
            StoreKind::Memory => Arc::new(MemoryTable::new()),
            StoreKind::Rest => {
                let api_key = store.api_key.clone().ok_or_else(|| {
                    LinkdashError::database_config("store.api_key is required for a REST store")
                })?;
                Arc::new(RestTable::new(
                    &store.url,
                    &store.table,
                    api_key,
                    config.session.access_token.clone(),
                    store.timeout_secs,
                ))
            }
            StoreKind::Sql => {
                let backend_name = backend::infer_backend_from_url(&store.url)?;
                Arc::new(SeaOrmTable::new(&store.url, &backend_name, store.pool_size).await?)
            }
        };

        info!("Using {} link store", table.backend_name());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_store_kind() {
        assert_eq!(infer_store_kind("memory").unwrap(), StoreKind::Memory);
        assert_eq!(
            infer_store_kind("https://project.example.co").unwrap(),
            StoreKind::Rest
        );
        assert_eq!(infer_store_kind("sqlite://links.db").unwrap(), StoreKind::Sql);
        assert_eq!(infer_store_kind("links.db").unwrap(), StoreKind::Sql);
        assert_eq!(
            infer_store_kind("postgres://localhost/links").unwrap(),
            StoreKind::Sql
        );
        assert!(matches!(
            infer_store_kind("ftp://nowhere"),
            Err(LinkdashError::DatabaseConfig(_))
        ));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::unique_violation("alias exists");
        assert!(err.is_unique_violation());
        assert_eq!(err.to_string(), "[unique_violation] alias exists");
        assert!(!StoreError::transport("timeout").is_unique_violation());
    }
}
