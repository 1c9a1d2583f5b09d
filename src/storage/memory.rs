//! In-process link table
//!
//! Enforces the same unique constraint on `alias` as the real stores, so the
//! service's duplicate translation behaves identically against it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{LinkChanges, LinkRecord, LinkTable, NewLinkRow, StoreError, StoreResult};

#[derive(Clone)]
struct StoredRow {
    seq: u64,
    record: LinkRecord,
}

#[derive(Default)]
pub struct MemoryTable {
    rows: Arc<DashMap<String, StoredRow>>,
    /// alias -> id
    aliases: Arc<DashMap<String, String>>,
    seq: AtomicU64,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a fully-formed record, bypassing id assignment. Used to seed fixtures.
    ///
    /// Re-seeding an existing id replaces the row and releases its old alias.
    pub fn seed(&self, record: LinkRecord) -> StoreResult<()> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        match self.rows.entry(record.id.clone()) {
            Entry::Occupied(mut entry) => {
                let old_alias = entry.get().record.alias.clone();
                if old_alias != record.alias {
                    self.claim_alias(&record.alias, &record.id)?;
                    self.aliases
                        .remove_if(&old_alias, |_, owner| *owner == record.id);
                }
                entry.insert(StoredRow { seq, record });
            }
            Entry::Vacant(entry) => {
                self.claim_alias(&record.alias, &record.id)?;
                entry.insert(StoredRow { seq, record });
            }
        }
        Ok(())
    }

    fn claim_alias(&self, alias: &str, id: &str) -> StoreResult<()> {
        match self.aliases.entry(alias.to_string()) {
            Entry::Occupied(entry) if entry.get() != id => {
                Err(StoreError::unique_violation(format!(
                    "duplicate key value violates unique constraint \"links_alias_key\": alias={}",
                    alias
                )))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(id.to_string());
                Ok(())
            }
        }
    }
}

#[async_trait]
impl LinkTable for MemoryTable {
    async fn select_by_owner(&self, owner: &str) -> StoreResult<Vec<LinkRecord>> {
        let mut rows: Vec<StoredRow> = self
            .rows
            .iter()
            .filter(|row| row.record.user_id == owner)
            .map(|row| row.value().clone())
            .collect();

        rows.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(rows.into_iter().map(|row| row.record).collect())
    }

    async fn select_by_id(&self, id: &str) -> StoreResult<Option<LinkRecord>> {
        Ok(self.rows.get(id).map(|row| row.record.clone()))
    }

    async fn select_ids_by_alias(
        &self,
        alias: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let ids = self
            .rows
            .iter()
            .filter(|row| row.record.alias == alias)
            .filter(|row| exclude_id != Some(row.record.id.as_str()))
            .map(|row| row.record.id.clone())
            .collect();
        Ok(ids)
    }

    async fn insert(&self, row: NewLinkRow) -> StoreResult<LinkRecord> {
        let id = uuid::Uuid::new_v4().to_string();
        self.claim_alias(&row.alias, &id)?;

        let record = row.into_record(id);
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.rows.insert(
            record.id.clone(),
            StoredRow {
                seq,
                record: record.clone(),
            },
        );
        debug!("MemoryTable: inserted '{}' ({})", record.alias, record.id);
        Ok(record)
    }

    async fn update(&self, id: &str, changes: LinkChanges) -> StoreResult<Option<LinkRecord>> {
        // row guard held until the alias index agrees with the row
        let Some(mut row) = self.rows.get_mut(id) else {
            return Ok(None);
        };
        let old_alias = row.record.alias.clone();

        if let Some(ref alias) = changes.alias
            && *alias != old_alias
        {
            self.claim_alias(alias, id)?;
            self.aliases.remove_if(&old_alias, |_, owner| owner == id);
        }

        changes.apply_to(&mut row.record);
        Ok(Some(row.record.clone()))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        if let Some((_, row)) = self.rows.remove(id) {
            self.aliases
                .remove_if(&row.record.alias, |_, owner| owner == id);
            debug!("MemoryTable: deleted '{}'", id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
