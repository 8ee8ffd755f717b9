//! Experience store: trait-based access to the user's experience records.
//!
//! Default: `PgExperienceStore` (PostgreSQL via sqlx).
//! `AppState` holds an `Arc<dyn ExperienceStore>`.
//!
//! Deletes are soft: rows get a `deleted_at` timestamp and drop out of reads.
//! Pages are newest-first, keyed on `sequence_number`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::experience::{
    ExperiencePage, ExperiencePatch, ExperienceRecord, ExperienceRow, NewExperience,
};

pub const MAX_PAGE_SIZE: i64 = 100;

const RETURNING_COLUMNS: &str = "id, user_id, kind, activity_name, activity_type, activity_date, \
     story_title, story_summary, detailed_content, core_competency, job_alignment, \
     created_at, sequence_number";

#[async_trait]
pub trait ExperienceStore: Send + Sync {
    async fn create(&self, new: NewExperience) -> Result<ExperienceRecord, AppError>;

    /// Reads one page. `cursor` is the `next_cursor` of the previous page.
    async fn list_page(
        &self,
        user_id: Uuid,
        cursor: Option<i64>,
        limit: i64,
    ) -> Result<ExperiencePage, AppError>;

    async fn update(&self, id: Uuid, patch: ExperiencePatch) -> Result<ExperienceRecord, AppError>;

    async fn soft_delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError>;
}

pub struct PgExperienceStore {
    pool: PgPool,
}

impl PgExperienceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExperienceStore for PgExperienceStore {
    async fn create(&self, new: NewExperience) -> Result<ExperienceRecord, AppError> {
        let sql = format!(
            r#"
            INSERT INTO experiences
                (id, user_id, kind, activity_name, activity_type, activity_date,
                 story_title, story_summary, detailed_content, core_competency, job_alignment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {RETURNING_COLUMNS}
            "#
        );
        let row: ExperienceRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(new.user_id)
            .bind(new.kind.as_str())
            .bind(&new.activity_name)
            .bind(&new.activity_type)
            .bind(&new.activity_date)
            .bind(&new.story_title)
            .bind(&new.story_summary)
            .bind(&new.detailed_content)
            .bind(&new.core_competency)
            .bind(&new.job_alignment)
            .fetch_one(&self.pool)
            .await?;

        info!(
            "Created {} experience {} for user {}",
            new.kind.as_str(),
            row.id,
            row.user_id
        );
        Ok(row.into())
    }

    async fn list_page(
        &self,
        user_id: Uuid,
        cursor: Option<i64>,
        limit: i64,
    ) -> Result<ExperiencePage, AppError> {
        let limit = clamp_limit(limit);
        let sql = format!(
            r#"
            SELECT {RETURNING_COLUMNS}
            FROM experiences
            WHERE user_id = $1
              AND deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR sequence_number < $2)
            ORDER BY sequence_number DESC
            LIMIT $3
            "#
        );
        // One extra row tells us whether another page exists.
        let rows: Vec<ExperienceRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(cursor)
            .bind(limit + 1)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_page(
            rows.into_iter().map(ExperienceRecord::from).collect(),
            limit as usize,
        ))
    }

    async fn update(&self, id: Uuid, patch: ExperiencePatch) -> Result<ExperienceRecord, AppError> {
        if patch.is_empty() {
            return Err(AppError::Validation(
                "Patch must change at least one field".to_string(),
            ));
        }

        let sql = format!(
            r#"
            UPDATE experiences SET
                kind             = COALESCE($3, kind),
                activity_name    = COALESCE($4, activity_name),
                activity_type    = COALESCE($5, activity_type),
                activity_date    = COALESCE($6, activity_date),
                story_title      = COALESCE($7, story_title),
                story_summary    = COALESCE($8, story_summary),
                detailed_content = COALESCE($9, detailed_content),
                core_competency  = COALESCE($10, core_competency),
                job_alignment    = COALESCE($11, job_alignment)
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            RETURNING {RETURNING_COLUMNS}
            "#
        );
        let row: Option<ExperienceRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(patch.user_id)
            .bind(patch.kind.map(|k| k.as_str()))
            .bind(patch.activity_name)
            .bind(patch.activity_type)
            .bind(patch.activity_date)
            .bind(patch.story_title)
            .bind(patch.story_summary)
            .bind(patch.detailed_content)
            .bind(patch.core_competency)
            .bind(patch.job_alignment)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
        info!("Updated experience {id}");
        Ok(row.into())
    }

    async fn soft_delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE experiences SET deleted_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Experience {id} not found")));
        }
        info!("Soft-deleted experience {id} for user {user_id}");
        Ok(())
    }
}

/// Reads every live record for `user_id`, newest first, one full page at a time.
pub async fn list_all(
    store: &dyn ExperienceStore,
    user_id: Uuid,
) -> Result<Vec<ExperienceRecord>, AppError> {
    let mut records = Vec::new();
    let mut cursor = None;
    loop {
        let page = store.list_page(user_id, cursor, MAX_PAGE_SIZE).await?;
        records.extend(page.records);
        match page.next_cursor {
            Some(next) if page.has_more => cursor = Some(next),
            _ => break,
        }
    }
    debug!("Read {} experiences for user {user_id}", records.len());
    Ok(records)
}

pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Trims a `limit + 1` fetch down to a page and derives the continuation cursor.
pub fn into_page(mut records: Vec<ExperienceRecord>, limit: usize) -> ExperiencePage {
    let has_more = records.len() > limit;
    records.truncate(limit);
    let next_cursor = records.last().map(|r| r.sequence_number);
    ExperiencePage {
        records,
        next_cursor,
        has_more,
    }
}
