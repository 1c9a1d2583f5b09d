use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link row as stored in the remote `links` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub user_id: String,
    pub alias: String,
    pub original_url: String,
    #[serde(default)]
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row sent to the store on insert. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLinkRow {
    pub user_id: String,
    pub alias: String,
    pub original_url: String,
    pub visit_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewLinkRow {
    /// Materialize the row with the id the store assigned.
    pub fn into_record(self, id: String) -> LinkRecord {
        LinkRecord {
            id,
            user_id: self.user_id,
            alias: self.alias,
            original_url: self.original_url,
            visit_count: self.visit_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update. `None` fields are left untouched; `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl LinkChanges {
    pub fn apply_to(&self, record: &mut LinkRecord) {
        if let Some(ref url) = self.original_url {
            record.original_url = url.clone();
        }
        if let Some(ref alias) = self.alias {
            record.alias = alias.clone();
        }
        record.updated_at = self.updated_at;
    }
}
