//! The image store: the storage directory and the `images` table behind
//! one narrow interface.
//!
//! HTTP handlers only see [`ImageStore`]; [`DiskImageStore`] is the
//! production implementation (flat directory + SQLite).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use picshelf_core::types::DbId;
use picshelf_core::upload::{format_upload_time, is_opaque_key};

use crate::models::image::{CreateImageRecord, ImageRecord};
use crate::repositories::ImageRepo;
use crate::DbPool;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure inside the image store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure on the storage directory.
    #[error("{source}: '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata store failure (connection, query, missing table).
    #[error("{0}")]
    Metadata(#[from] sqlx::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the underlying cause is a filesystem permission error.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == ErrorKind::PermissionDenied)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Interface
// ---------------------------------------------------------------------------

/// A validated upload ready to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct NewImage<'a> {
    /// Generated on-disk name; must already be sanitized.
    pub stored_name: &'a str,
    /// Client-supplied name, kept for display.
    pub original_name: &'a str,
    /// Upload instant, recorded as the row's `upload_time`.
    pub uploaded_at: NaiveDateTime,
    pub contents: &'a [u8],
}

/// A file resolved from the storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub len: u64,
}

/// Access to stored images and their metadata.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write the file, then insert its metadata row.
    ///
    /// There is no rollback: if the insert fails the file stays on disk.
    async fn put(&self, image: NewImage<'_>) -> StoreResult<ImageRecord>;

    /// All records, most recent upload first.
    async fn list(&self) -> StoreResult<Vec<ImageRecord>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<ImageRecord>>;

    /// Resolve a stored filename to a file in the storage directory.
    ///
    /// Returns `None` when the name is not a flat key or no such file
    /// exists. No metadata row is required.
    async fn open_by_filename(&self, filename: &str) -> StoreResult<Option<StoredFile>>;

    /// Remove the backing file (if present) and then the row.
    ///
    /// Returns the deleted record, or `None` when the id is unknown.
    async fn delete_by_id(&self, id: DbId) -> StoreResult<Option<ImageRecord>>;

    /// Whether the metadata store is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}

// ---------------------------------------------------------------------------
// Disk + SQLite implementation
// ---------------------------------------------------------------------------

/// Stores files flat under `upload_dir` and metadata in SQLite.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    pool: DbPool,
    upload_dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(pool: DbPool, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            upload_dir: upload_dir.into(),
        }
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_upload_dir(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| StoreError::io(&self.upload_dir, e))
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn put(&self, image: NewImage<'_>) -> StoreResult<ImageRecord> {
        self.ensure_upload_dir().await?;

        let path = self.upload_dir.join(image.stored_name);
        tokio::fs::write(&path, image.contents)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        let file_size = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?
            .len();
        tracing::debug!(path = %path.display(), file_size, "Wrote image file");

        let record = ImageRepo::create(
            &self.pool,
            &CreateImageRecord {
                filename: image.stored_name.to_string(),
                original_name: image.original_name.to_string(),
                file_path: path.to_string_lossy().into_owned(),
                upload_time: format_upload_time(image.uploaded_at),
                file_size: Some(file_size as i64),
            },
        )
        .await
        .inspect_err(|e| {
            tracing::warn!(error = %e, path = %path.display(), "Insert failed, image file left orphaned");
        })?;

        Ok(record)
    }

    async fn list(&self) -> StoreResult<Vec<ImageRecord>> {
        Ok(ImageRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<ImageRecord>> {
        Ok(ImageRepo::find_by_id(&self.pool, id).await?)
    }

    async fn open_by_filename(&self, filename: &str) -> StoreResult<Option<StoredFile>> {
        if !is_opaque_key(filename) {
            return Ok(None);
        }

        let path = self.upload_dir.join(filename);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(StoredFile {
                len: meta.len(),
                path,
            })),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    async fn delete_by_id(&self, id: DbId) -> StoreResult<Option<ImageRecord>> {
        let Some(record) = ImageRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let path = Path::new(&record.file_path);
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed image file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Image file already gone");
            }
            Err(e) => return Err(StoreError::io(path, e)),
        }

        ImageRepo::delete(&self.pool, id).await?;
        Ok(Some(record))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
