//! Shareable report links.
//!
//! Sharing writes an immutable JSON snapshot of the report to S3 and records it
//! in `shared_reports`. Snapshots are never updated; re-sharing creates a new id.

use std::future::Future;

use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::report::SharedReportRow;
use crate::report::models::CareerReport;

#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    pub id: Uuid,
    pub url: String,
}

pub fn snapshot_key(id: Uuid) -> String {
    format!("reports/{id}.json")
}

/// Public URL for a shared report, with the snapshot id as the `id` query parameter.
pub fn share_url(base_url: &str, id: Uuid) -> String {
    format!("{}/report/shared?id={id}", base_url.trim_end_matches('/'))
}

pub async fn share_report(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    base_url: &str,
    user_id: Uuid,
    report: &CareerReport,
) -> Result<ShareLink, AppError> {
    let id = Uuid::new_v4();
    let s3_key = snapshot_key(id);
    let body = serde_json::to_vec(report)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize report: {e}")))?;

    s3.put_object()
        .bucket(s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(body))
        .content_type("application/json")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Snapshot upload failed: {e}")))?;

    let insert = async {
        sqlx::query("INSERT INTO shared_reports (id, user_id, s3_key) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(&s3_key)
            .execute(pool)
            .await?;
        Ok::<(), AppError>(())
    };
    let discard = async {
        s3.delete_object()
            .bucket(s3_bucket)
            .key(&s3_key)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    };
    record_or_discard(&s3_key, insert, discard).await?;

    info!("Shared report {id} for user {user_id} at s3://{s3_bucket}/{s3_key}");

    Ok(ShareLink {
        id,
        url: share_url(base_url, id),
    })
}

/// Awaits `insert`; on failure awaits `discard` to remove the uploaded snapshot.
/// A failed discard is logged with the key and the insert error is returned either way.
async fn record_or_discard<I, D>(s3_key: &str, insert: I, discard: D) -> Result<(), AppError>
where
    I: Future<Output = Result<(), AppError>>,
    D: Future<Output = Result<(), String>>,
{
    let Err(e) = insert.await else {
        return Ok(());
    };
    warn!("Share row insert failed, removing snapshot {s3_key}: {e}");
    if let Err(cleanup) = discard.await {
        error!("Orphaned report snapshot {s3_key}: {cleanup}");
    }
    Err(e)
}

pub async fn load_shared_report(
    pool: &PgPool,
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    id: Uuid,
) -> Result<CareerReport, AppError> {
    let row: SharedReportRow = sqlx::query_as("SELECT * FROM shared_reports WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shared report {id} not found")))?;

    let object = s3
        .get_object()
        .bucket(s3_bucket)
        .key(&row.s3_key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Snapshot download failed: {e}")))?;
    let bytes = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("Snapshot read failed: {e}")))?
        .into_bytes();

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Corrupt report snapshot {id}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_share_url_embeds_id_as_query_parameter() {
        let id = Uuid::new_v4();
        assert_eq!(
            share_url("https://careerlog.app/", id),
            format!("https://careerlog.app/report/shared?id={id}")
        );
    }

    #[tokio::test]
    async fn test_failed_insert_discards_snapshot() {
        let discarded = AtomicBool::new(false);
        let result = record_or_discard(
            "reports/x.json",
            async { Err(AppError::Validation("duplicate".into())) },
            async {
                discarded.store(true, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(discarded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_successful_insert_keeps_snapshot() {
        let discarded = AtomicBool::new(false);
        let result = record_or_discard("reports/x.json", async { Ok(()) }, async {
            discarded.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(result.is_ok());
        assert!(!discarded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_discard_still_returns_insert_error() {
        let result = record_or_discard(
            "reports/x.json",
            async { Err(AppError::NotFound("row".into())) },
            async { Err("access denied".to_string()) },
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_snapshot_key() {
        let id = Uuid::nil();
        assert_eq!(
            snapshot_key(id),
            "reports/00000000-0000-0000-0000-000000000000.json"
        );
    }
}
