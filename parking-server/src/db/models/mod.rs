//! Database Models

// Serde helpers
pub mod serde_helpers;

// Identity
pub mod user;

// Location
pub mod slot;
pub mod zone;

// Re-exports
pub use shared::models::DeletePolicy;
pub use slot::{NewSlot, Slot, SlotId};
pub use user::{NewUser, User, UserCredentials, UserId};
pub use zone::{NewZone, Zone, ZoneId};

impl DeletePolicy for Zone {
    const SUPPORTS_RESTORE: bool = true;
}

impl DeletePolicy for Slot {
    const SUPPORTS_RESTORE: bool = false;
}

impl DeletePolicy for User {
    const SUPPORTS_RESTORE: bool = false;
}
