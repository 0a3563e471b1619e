// Saved-match persistence
// JSON document under a single key of a key-value store, with versioning

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;
pub mod store;

pub use error::StoreError;
pub use format::{current_timestamp, decode, encode, saved_match_schema, SavedMatch, SavedMatches};
pub use manager::SaveManager;
pub use migration::migrate_document;
pub use store::{FileStore, KeyValueStore, MemoryStore};

pub const SAVE_VERSION: u32 = 1;
pub const SAVED_MATCHES_KEY: &str = "saved_matches";
