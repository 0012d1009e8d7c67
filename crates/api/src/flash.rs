//! Transient user-facing notices.
//!
//! A notice rides along in the query string of the redirect back to `/`
//! and is rendered once by the listing page. Nothing is stored server-side.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A notice shown on the next listing page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    #[serde(rename = "notice")]
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// Listing URL carrying this notice, e.g. `/?kind=error&notice=...`.
    pub fn location(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("/?{query}"),
            Err(e) => {
                tracing::warn!(error = %e, "Could not encode notice, dropping it");
                "/".to_string()
            }
        }
    }

    /// 303 redirect to the listing page with this notice attached.
    pub fn redirect(&self) -> Redirect {
        Redirect::to(&self.location())
    }
}

/// Query parameters accepted by the listing page.
///
/// Every field is optional text so a hand-edited URL never fails the page.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub kind: Option<String>,
    pub notice: Option<String>,
}

impl FlashParams {
    /// The notice to render, if any. Unknown kinds render as errors.
    pub fn into_flash(self) -> Option<Flash> {
        let message = self.notice.filter(|m| !m.is_empty())?;
        let kind = match self.kind.as_deref() {
            Some("success") => FlashKind::Success,
            _ => FlashKind::Error,
        };
        Some(Flash { kind, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_encodes_notice() {
        let flash = Flash::success("\"a b.png\" uploaded successfully!");
        assert_eq!(
            flash.location(),
            "/?kind=success&notice=%22a+b.png%22+uploaded+successfully%21"
        );
    }

    #[test]
    fn location_round_trips_through_params() {
        let flash = Flash::error("Upload failed: disk & cable unplugged");
        let query = flash.location();
        let params: FlashParams =
            serde_urlencoded::from_str(query.trim_start_matches("/?")).unwrap();
        assert_eq!(params.into_flash(), Some(flash));
    }

    #[test]
    fn params_without_notice_yield_nothing() {
        let params = FlashParams {
            kind: Some("success".into()),
            notice: None,
        };
        assert_eq!(params.into_flash(), None);
        assert_eq!(FlashParams::default().into_flash(), None);
    }

    #[test]
    fn unknown_kind_renders_as_error() {
        let params = FlashParams {
            kind: Some("bogus".into()),
            notice: Some("hi".into()),
        };
        assert_eq!(params.into_flash().unwrap().kind, FlashKind::Error);
    }
}
