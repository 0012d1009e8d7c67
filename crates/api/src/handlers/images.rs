//! Handlers for the gallery page, uploads, stored files and deletion.
//!
//! Form endpoints (`/upload`, `/delete/{id}`) always answer with a redirect
//! to `/`; failures travel as an error notice rather than an error status.
//! The only exception is an oversized body, which is refused with 413.

use axum::body::Body;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use picshelf_core::content_type::content_type_for_extension;
use picshelf_core::error::CoreError;
use picshelf_core::types::DbId;
use picshelf_core::upload::UPLOAD_FIELD;
use picshelf_db::models::image::ImageRecord;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::flash::{Flash, FlashParams};
use crate::gallery::{self, UploadError, UploadedFile};
use crate::render;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /
///
/// Renders the gallery, newest upload first, plus any notice carried in
/// the query string. A query that does not parse renders without a notice.
pub async fn index(
    State(state): State<AppState>,
    params: Result<Query<FlashParams>, QueryRejection>,
) -> Html<String> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Ignoring malformed notice query");
            FlashParams::default()
        }
    };
    let images = gallery::list_images(state.store.as_ref()).await;
    let flash = params.into_flash();
    Html(render::index_page(
        &images,
        flash.as_ref(),
        state.config.max_upload_bytes,
    ))
}

/// GET /api/v1/images
pub async fn list_json(State(state): State<AppState>) -> Json<DataResponse<Vec<ImageRecord>>> {
    let images = gallery::list_images(state.store.as_ref()).await;
    Json(DataResponse { data: images })
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// POST /upload
///
/// Accepts a multipart form with a single `file` field. A request that is
/// not a multipart form is treated like a form without a file.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let file = match multipart {
        Ok(multipart) => match read_upload_field(multipart).await {
            Ok(file) => file,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::debug!(error = %e, "Upload rejected: body too large");
                return Err(AppError::PayloadTooLarge);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed upload form");
                return Ok(Flash::error(format!("Upload failed: {}", e.body_text()))
                    .redirect()
                    .into_response());
            }
        },
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Upload without a multipart body");
            None
        }
    };

    let now = chrono::Local::now().naive_local();
    let flash = match gallery::upload_image(state.store.as_ref(), file, now).await {
        Ok(record) => Flash::success(format!(
            "\"{}\" uploaded successfully!",
            record.original_name
        )),
        Err(UploadError::Rejected(rejection)) => {
            tracing::debug!(%rejection, "Upload rejected");
            Flash::error(rejection.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload failed");
            Flash::error(e.to_string())
        }
    };

    Ok(flash.redirect().into_response())
}

/// Drain the form, keeping the first `file` field. Other fields are skipped.
async fn read_upload_field(mut multipart: Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if upload.is_some() || field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let contents = field.bytes().await?;
        upload = Some(UploadedFile { filename, contents });
    }

    Ok(upload)
}

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// GET /uploads/{filename}
///
/// Streams a stored file. The filename is an opaque key into the storage
/// directory; anything path-like is reported as not found.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Upload",
            key: filename.clone(),
        })
    };

    let stored = state
        .store
        .open_by_filename(&filename)
        .await?
        .ok_or_else(not_found)?;

    let file = match tokio::fs::File::open(&stored.path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_extension(&filename))
        .header(header::CONTENT_LENGTH, stored.len.to_string())
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// POST /delete/{id}
///
/// Unknown ids redirect without a notice, so repeating a delete is harmless.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> Redirect {
    match gallery::delete_image(state.store.as_ref(), id).await {
        Ok(Some(record)) => Flash::success(format!("\"{}\" deleted.", record.original_name)).redirect(),
        Ok(None) => Redirect::to("/"),
        Err(e) => {
            tracing::error!(id, error = %e, "Delete failed");
            Flash::error(format!("Delete failed: {e}")).redirect()
        }
    }
}
