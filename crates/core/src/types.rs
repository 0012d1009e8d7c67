/// All database primary keys are SQLite `INTEGER PRIMARY KEY` values.
pub type DbId = i64;

/// `strftime` format of the `upload_time` column. Lexicographic order
/// equals chronological order, so the column doubles as the sort key.
pub const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `strftime` format of the prefix prepended to stored filenames.
pub const STORED_NAME_PREFIX_FORMAT: &str = "%Y%m%d_%H%M%S_";
