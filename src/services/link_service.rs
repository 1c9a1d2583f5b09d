//! Link management service
//!
//! Owns the alias protocol for creates and updates: an advisory availability
//! check before writing, then translation of the store's unique-constraint
//! error into [`LinkdashError::DuplicateAlias`] when another writer won the
//! race between check and write.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::{LinkdashError, Result};
use crate::services::dashboard::DashboardStats;
use crate::services::link_view::{LinkPage, LinkQuery};
use crate::session::{Principal, SessionProvider};
use crate::storage::{LinkChanges, LinkRecord, LinkTable, NewLinkRow, StoreError};
use crate::utils::url_validator::validate_url;
use crate::utils::{DEFAULT_ALIAS_LENGTH, generate_alias, is_valid_alias};

// ============ Request DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Target URL
    pub original_url: String,
    /// Alias (optional, generated if absent or empty)
    pub alias: Option<String>,
}

impl CreateLinkRequest {
    pub fn new<T: Into<String>>(original_url: T) -> Self {
        Self {
            original_url: original_url.into(),
            alias: None,
        }
    }

    pub fn with_alias<T: Into<String>>(mut self, alias: T) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// Request to update an existing link. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkRequest {
    pub original_url: Option<String>,
    pub alias: Option<String>,
}

// ============ LinkService Implementation ============

/// Service for link management operations
pub struct LinkService {
    table: Arc<dyn LinkTable>,
    session: Arc<dyn SessionProvider>,
    alias_length: usize,
}

impl LinkService {
    /// Create a new LinkService instance
    pub fn new(table: Arc<dyn LinkTable>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            table,
            session,
            alias_length: DEFAULT_ALIAS_LENGTH,
        }
    }

    /// Length of generated aliases (at least 1)
    pub fn with_alias_length(mut self, length: usize) -> Self {
        self.alias_length = length.max(1);
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.table.backend_name()
    }

    async fn require_principal(&self) -> Result<Principal> {
        self.session
            .current_principal()
            .await
            .ok_or(LinkdashError::NotAuthenticated)
    }

    fn check_url(url: &str) -> Result<String> {
        validate_url(url).map_err(|e| LinkdashError::validation(e.to_string()))
    }

    fn check_alias(alias: &str) -> Result<()> {
        if is_valid_alias(alias) {
            Ok(())
        } else {
            Err(LinkdashError::validation(format!(
                "Invalid alias '{}'. Only letters, digits, '-' and '_' are allowed.",
                alias
            )))
        }
    }

    /// Map a failed write: a unique violation becomes `DuplicateAlias(alias)`.
    fn translate_write_error(err: StoreError, alias: Option<&str>) -> LinkdashError {
        match alias {
            Some(alias) if err.is_unique_violation() => {
                warn!("LinkService: alias '{}' taken at write time", alias);
                LinkdashError::duplicate(alias)
            }
            _ => LinkdashError::store_write(err.to_string()),
        }
    }

    // ============ Queries ============

    /// All links owned by the current principal, newest first.
    ///
    /// An anonymous caller gets an empty list.
    pub async fn list(&self) -> Result<Vec<LinkRecord>> {
        let Some(principal) = self.session.current_principal().await else {
            debug!("LinkService: list without a session");
            return Ok(Vec::new());
        };

        self.table
            .select_by_owner(&principal.id)
            .await
            .map_err(LinkdashError::from_query)
    }

    /// One page of the current principal's links, filtered and sorted.
    pub async fn list_page(&self, query: &LinkQuery) -> Result<LinkPage> {
        Ok(query.apply(self.list().await?))
    }

    /// Get a single link
    pub async fn get_by_id(&self, id: &str) -> Result<Option<LinkRecord>> {
        self.table
            .select_by_id(id)
            .await
            .map_err(LinkdashError::from_query)
    }

    /// `true` when no record other than `exclude_id` carries `alias`.
    pub async fn is_alias_available(&self, alias: &str, exclude_id: Option<&str>) -> Result<bool> {
        let ids = self
            .table
            .select_ids_by_alias(alias, exclude_id)
            .await
            .map_err(LinkdashError::from_query)?;
        debug!(
            "LinkService: alias '{}' has {} other holder(s)",
            alias,
            ids.len()
        );
        Ok(ids.is_empty())
    }

    /// Dashboard statistics over the current principal's links.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let links = self.list().await?;
        Ok(DashboardStats::from_links(&links, Utc::now()))
    }

    // ============ Mutations ============

    /// Create a new link for the current principal
    pub async fn create(&self, req: CreateLinkRequest) -> Result<LinkRecord> {
        let principal = self.require_principal().await?;
        let original_url = Self::check_url(&req.original_url)?;

        let alias = match req.alias.filter(|a| !a.is_empty()) {
            Some(alias) => {
                Self::check_alias(&alias)?;
                alias
            }
            None => generate_alias(self.alias_length),
        };

        if !self.is_alias_available(&alias, None).await? {
            warn!("LinkService: alias '{}' already taken", alias);
            return Err(LinkdashError::duplicate(alias));
        }

        let now = Utc::now();
        let row = NewLinkRow {
            user_id: principal.id,
            alias: alias.clone(),
            original_url,
            visit_count: 0,
            created_at: now,
            updated_at: now,
        };

        let record = self
            .table
            .insert(row)
            .await
            .map_err(|e| Self::translate_write_error(e, Some(&alias)))?;

        info!(
            "LinkService: created '{}' -> '{}'",
            record.alias, record.original_url
        );
        Ok(record)
    }

    /// Update an existing link
    ///
    /// A missing row is reported as `StoreWrite`. Ownership is enforced by
    /// the store, not here.
    pub async fn update(&self, id: &str, req: UpdateLinkRequest) -> Result<LinkRecord> {
        let original_url = req
            .original_url
            .as_deref()
            .map(Self::check_url)
            .transpose()?;

        if let Some(ref alias) = req.alias {
            Self::check_alias(alias)?;
            if !self.is_alias_available(alias, Some(id)).await? {
                warn!("LinkService: alias '{}' already taken", alias);
                return Err(LinkdashError::duplicate(alias.as_str()));
            }
        }

        let changes = LinkChanges {
            original_url,
            alias: req.alias.clone(),
            updated_at: Utc::now(),
        };

        let record = self
            .table
            .update(id, changes)
            .await
            .map_err(|e| Self::translate_write_error(e, req.alias.as_deref()))?
            .ok_or_else(|| LinkdashError::store_write(format!("No link with id '{}'", id)))?;

        info!("LinkService: updated '{}'", record.id);
        Ok(record)
    }

    /// Delete a link. Deleting an absent id succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.table
            .delete(id)
            .await
            .map_err(|e| LinkdashError::store_write(e.to_string()))?;

        info!("LinkService: deleted '{}'", id);
        Ok(())
    }
}
