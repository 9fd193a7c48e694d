//! Data models
//!
//! Shared between parking-server and its clients (via API).
//! Record ids travel as `"table:key"` strings.

pub mod slot;
pub mod user;
pub mod zone;

// Re-exports
pub use slot::*;
pub use user::*;
pub use zone::*;

/// Whether deleting an entity can be undone.
///
/// Zones are soft-deleted and restorable. The client offers undo from this
/// flag; the server implements it on its stored records.
pub trait DeletePolicy {
    const SUPPORTS_RESTORE: bool;
}

impl DeletePolicy for Zone {
    const SUPPORTS_RESTORE: bool = true;
}
