//! Domain logic shared by the picshelf crates.
//!
//! Everything here is pure: filename validation and generation, content
//! type lookup, display formatting. No I/O.

pub mod content_type;
pub mod error;
pub mod format;
pub mod types;
pub mod upload;
