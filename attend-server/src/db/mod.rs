//! Database Module
//!
//! Embedded SurrealDB storage for users and attendance records.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "attendance";
const DATABASE: &str = "portal";

/// Schema bootstrap: two tables, each guarded by a unique index.
///
/// The composite attendance index is what makes concurrent duplicate
/// submissions converge instead of duplicating rows.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS uniq_user_email ON TABLE user FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS attendance SCHEMALESS;
DEFINE INDEX IF NOT EXISTS uniq_attendance_slot ON TABLE attendance
    FIELDS user, class_date, time_slot_key UNIQUE;
"#;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path` and apply schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let service = Self::finish_init(db).await?;
        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");
        Ok(service)
    }

    /// In-memory database for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::finish_init(db).await
    }

    async fn finish_init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        Ok(Self { db })
    }
}
