//! Image metadata model and DTOs for the `images` table.

use picshelf_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ImageRecord {
    pub id: DbId,
    /// Generated on-disk name (timestamp-prefixed, sanitized).
    pub filename: String,
    /// Name supplied by the uploading client, display only.
    pub original_name: String,
    /// Full path used to read and delete the file.
    pub file_path: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    pub upload_time: String,
    pub file_size: Option<i64>,
}

/// DTO for inserting a new image row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImageRecord {
    pub filename: String,
    pub original_name: String,
    pub file_path: String,
    pub upload_time: String,
    pub file_size: Option<i64>,
}
