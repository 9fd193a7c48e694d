//! Shared types for the campus parking system
//!
//! Wire models, request/response payloads and the reservation window
//! used by both `parking-server` and `parking-client`.

pub mod client;
pub mod models;
pub mod reservation;
pub mod response;

// Re-exports
pub use reservation::{ReservationWindow, WindowStatus};
pub use response::{ErrorBody, MessageResponse};
pub use serde::{Deserialize, Serialize};
