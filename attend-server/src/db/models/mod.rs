//! Database models matching the SurrealDB tables

pub mod attendance;
pub mod serde_helpers;
pub mod user;

pub use attendance::{Attendance, NewAttendance};
pub use user::{User, UserCreate};

use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;
