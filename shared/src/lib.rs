//! Shared types for the attendance portal
//!
//! Domain enums and API request/response types used by the server and any
//! future Rust client. Wire format is camelCase JSON, matching the portal's
//! existing SPA contract.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{AttendanceStatus, Group, SubjectStat};
