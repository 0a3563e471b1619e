use super::error::StoreError;
use super::migration::migrate_document;
use super::SAVE_VERSION;
use crate::models::Match;
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A match snapshot as written to the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct SavedMatch {
    /// When the snapshot was taken (RFC 3339)
    #[serde(default)]
    pub saved_at: String,

    #[serde(rename = "match")]
    pub record: Match,
}

impl SavedMatch {
    pub fn new(record: Match) -> Self {
        Self {
            saved_at: current_timestamp(),
            record,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }
}

/// Everything stored under the saved-matches key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct SavedMatches {
    /// Document format version for migration
    pub version: u32,

    /// Snapshots in save order
    pub matches: Vec<SavedMatch>,
}

impl Default for SavedMatches {
    fn default() -> Self {
        Self::new()
    }
}

impl SavedMatches {
    pub fn new() -> Self {
        Self {
            version: SAVE_VERSION,
            matches: Vec::new(),
        }
    }
}

/// Serialize the document for the store.
pub fn encode(doc: &SavedMatches) -> Result<String, StoreError> {
    Ok(serde_json::to_string(doc)?)
}

/// Parse a stored document, migrating older layouts.
pub fn decode(text: &str) -> Result<SavedMatches, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    migrate_document(value)
}

/// JSON schema of a stored snapshot, the stable field set of the format.
pub fn saved_match_schema() -> RootSchema {
    schema_for!(SavedMatch)
}

pub fn current_timestamp() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
}
