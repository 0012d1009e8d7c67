//! Gallery operations behind the HTTP handlers.
//!
//! Each operation returns a typed result; the handlers decide how that
//! becomes a redirect, a notice or a response body.

use axum::body::Bytes;
use chrono::NaiveDateTime;
use picshelf_core::types::DbId;
use picshelf_core::upload::{stored_filename, validate_client_filename, UploadRejection};
use picshelf_db::models::image::ImageRecord;
use picshelf_db::store::{ImageStore, NewImage, StoreError};

/// The `file` part of an upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client, if any.
    pub filename: Option<String>,
    pub contents: Bytes,
}

/// Why an upload did not produce a record.
///
/// The `Display` text is the notice shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),

    #[error("Permission error: {0}")]
    PermissionDenied(#[source] StoreError),

    #[error("Upload failed: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for UploadError {
    fn from(err: StoreError) -> Self {
        if err.is_permission_denied() {
            Self::PermissionDenied(err)
        } else {
            Self::Store(err)
        }
    }
}

/// Validate, name and persist an upload.
///
/// `file` is `None` when the form had no `file` part. `now` provides both
/// the stored-name prefix and the recorded upload time.
pub async fn upload_image(
    store: &dyn ImageStore,
    file: Option<UploadedFile>,
    now: NaiveDateTime,
) -> Result<ImageRecord, UploadError> {
    let Some(file) = file else {
        return Err(UploadRejection::NoFileSelected.into());
    };

    let sanitized = validate_client_filename(file.filename.as_deref())?;
    let original_name = file.filename.as_deref().unwrap_or_default();
    let stored_name = stored_filename(now, &sanitized);

    let record = store
        .put(NewImage {
            stored_name: &stored_name,
            original_name,
            uploaded_at: now,
            contents: &file.contents,
        })
        .await?;

    tracing::info!(
        id = record.id,
        filename = %record.filename,
        file_size = ?record.file_size,
        "Image uploaded"
    );
    Ok(record)
}

/// All records, newest first. A failing store yields an empty list.
pub async fn list_images(store: &dyn ImageStore) -> Vec<ImageRecord> {
    store.list().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Listing images failed, showing an empty gallery");
        Vec::new()
    })
}

/// Delete a record and its backing file.
///
/// `Ok(None)` means the id was unknown; that is not an error.
pub async fn delete_image(
    store: &dyn ImageStore,
    id: DbId,
) -> Result<Option<ImageRecord>, StoreError> {
    let deleted = store.delete_by_id(id).await?;
    match &deleted {
        Some(record) => tracing::info!(id, filename = %record.filename, "Image deleted"),
        None => tracing::debug!(id, "Delete requested for unknown image"),
    }
    Ok(deleted)
}
