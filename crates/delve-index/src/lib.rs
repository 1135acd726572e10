// SQLite research-session store
// Sessions own an append-only log of research entries

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::{DEFAULT_LIST_LIMIT, Database};
pub use error::{Error, Result};
pub use records::{EntryRecord, SessionRecord, SessionSummary};
pub use schema::SCHEMA_VERSION;
