use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for an immutable shared-report snapshot. The body lives in S3.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedReportRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}
