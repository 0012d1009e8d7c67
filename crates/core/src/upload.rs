//! Upload validation and stored-filename generation.
//!
//! A client filename goes through three steps before it touches disk:
//! extension whitelisting, sanitization, and timestamp prefixing. The
//! result is the "stored filename" under which the file lives in the
//! storage directory.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::types::{STORED_NAME_PREFIX_FORMAT, UPLOAD_TIME_FORMAT};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the multipart form field carrying the upload.
pub const UPLOAD_FIELD: &str = "file";

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Default maximum request body size (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Anything outside this set is stripped from sanitized names.
static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid regex"));

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Why an upload was refused before anything was written.
///
/// The `Display` text is the notice shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("No file selected.")]
    NoFileSelected,

    #[error("Invalid file type. Only JPG, JPEG, PNG allowed.")]
    InvalidFileType,

    #[error("Invalid filename.")]
    InvalidFilename,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Whether `filename` ends in one of [`ALLOWED_EXTENSIONS`].
///
/// The extension is the text after the last `.`; a name without a dot has
/// no extension and is refused.
pub fn has_allowed_extension(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Non-ASCII characters are dropped, path separators become whitespace,
/// whitespace runs become a single `_`, characters outside
/// `[A-Za-z0-9_.-]` are removed and leading/trailing `.`/`_` are trimmed.
/// May return an empty string.
///
/// ```
/// use picshelf_core::upload::secure_filename;
///
/// assert_eq!(secure_filename("My Holiday Photo.PNG"), "My_Holiday_Photo.PNG");
/// assert_eq!(secure_filename("../../etc/passwd.png"), "etc_passwd.png");
/// ```
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = UNSAFE_CHARS_RE.replace_all(&joined, "");

    stripped.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Validate a client filename and return its sanitized form.
///
/// Checks run in the order the user sees them: presence, extension,
/// then whether anything survives sanitization.
pub fn validate_client_filename(filename: Option<&str>) -> Result<String, UploadRejection> {
    let filename = match filename {
        Some(name) if !name.is_empty() => name,
        _ => return Err(UploadRejection::NoFileSelected),
    };

    if !has_allowed_extension(filename) {
        return Err(UploadRejection::InvalidFileType);
    }

    let sanitized = secure_filename(filename);
    if sanitized.is_empty() {
        return Err(UploadRejection::InvalidFilename);
    }

    Ok(sanitized)
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Build the stored filename: `YYYYMMDD_HHMMSS_` + sanitized name.
///
/// Second resolution only; two uploads of the same name within one second
/// map to the same stored filename.
pub fn stored_filename(now: NaiveDateTime, sanitized: &str) -> String {
    format!("{}{sanitized}", now.format(STORED_NAME_PREFIX_FORMAT))
}

/// Render a timestamp in the `upload_time` column format.
pub fn format_upload_time(now: NaiveDateTime) -> String {
    now.format(UPLOAD_TIME_FORMAT).to_string()
}

/// Whether `name` can be used as a key into the storage directory.
///
/// Stored filenames are flat, so anything that could address another
/// directory entry (separators, `.`/`..`, NUL) is refused.
pub fn is_opaque_key(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
