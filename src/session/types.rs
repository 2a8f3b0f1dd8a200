use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::chat::{ChatRole, ImageMime};
use crate::error::ErrorKind;

/// Identifier for one dialogue session.
///
/// Reset always issues a fresh id, so a handle is never equal to any
/// prior one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata for an image that accompanied a turn.
///
/// Only dimensions and MIME type are retained; the pixel data itself is
/// transient and never cached in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime: ImageMime,
    pub width: u32,
    pub height: u32,
}

/// One message in the session transcript.
///
/// Turns are immutable once appended; the transcript grows append-only and
/// insertion order is display and export order.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: ChatRole,
    pub content: String,
    pub attachment: Option<ImageAttachment>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub(crate) fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub(crate) fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            attachment: None,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn with_attachment(mut self, attachment: ImageAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Normalized outcome of one submission against the remote service.
///
/// Produced on success and failure alike; `text` is always display-ready,
/// so a caller's only job is to render it.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub ok: bool,
    pub text: String,
    pub error: Option<ErrorKind>,
}

impl TurnResult {
    pub(crate) fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
            error: None,
        }
    }

    pub(crate) fn failure(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
            error: Some(kind),
        }
    }
}
