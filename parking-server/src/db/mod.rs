//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) plus schema bootstrap

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

pub const NAMESPACE: &str = "campus";
pub const DATABASE: &str = "parking";

/// Tables stay schemaless; only indexes are declared.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS user_role ON TABLE user FIELDS role;
DEFINE INDEX IF NOT EXISTS user_university_id ON TABLE user FIELDS university_id UNIQUE;
DEFINE TABLE IF NOT EXISTS zone SCHEMALESS;
DEFINE INDEX IF NOT EXISTS zone_is_deleted ON TABLE zone FIELDS is_deleted;
DEFINE TABLE IF NOT EXISTS slot SCHEMALESS;
DEFINE INDEX IF NOT EXISTS slot_zone ON TABLE slot FIELDS zone;
"#;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}
