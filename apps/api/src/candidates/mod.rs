//! Candidate source — where ranking gets a user's candidates from.
//!
//! The `candidates` table is owned by the dashboard's data store; this module
//! only reads it. `AppState` holds an `Arc<dyn CandidateStore>`.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, CandidateRow};

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// All candidates owned by `user_id`, newest first.
    async fn candidates_for_user(&self, user_id: Uuid) -> Result<Vec<CandidateRecord>, AppError>;
}

/// Postgres-backed candidate source.
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a read pool against the candidate database.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to candidate store...");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        info!("Candidate store pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn candidates_for_user(&self, user_id: Uuid) -> Result<Vec<CandidateRecord>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        info!("Found {} candidates for user {user_id}", rows.len());

        Ok(rows.into_iter().map(CandidateRecord::from).collect())
    }
}
