//! Repository for the `images` table.

use picshelf_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::image::{CreateImageRecord, ImageRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, original_name, file_path, upload_time, file_size";

/// Provides create/read/delete operations for image records. Rows are
/// never updated.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image row, returning the created record.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateImageRecord,
    ) -> Result<ImageRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (filename, original_name, file_path, upload_time, file_size)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageRecord>(&query)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(&input.file_path)
            .bind(&input.upload_time)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    /// Find an image by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<ImageRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ?");
        sqlx::query_as::<_, ImageRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all images, most recent upload first. Rows sharing an upload
    /// second come out newest insert first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<ImageRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images ORDER BY upload_time DESC, id DESC");
        sqlx::query_as::<_, ImageRecord>(&query).fetch_all(pool).await
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(pool)
            .await
    }
}
