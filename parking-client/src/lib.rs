//! Parking Client - HTTP client and UI state for the parking server
//!
//! [`HttpClient`] talks to the REST API. [`SessionContext`] owns the bearer
//! token. [`ParkingBoard`] and [`AdminRoster`] keep local lists in step with
//! the server using optimistic updates that roll back on failure.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod notifications;
pub mod reconcile;
pub mod session;

pub use api::ParkingApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notifications::{Notification, NotificationFeed, Severity};
pub use reconcile::{AdminRoster, BannerMode, ErrorBanner, ParkingBoard, optimistic_apply};
pub use session::{SessionContext, SessionStore, StoredSession};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, RegisterRequest};
pub use shared::models::UserInfo;
