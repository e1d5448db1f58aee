//! Error types for gallery loading and guard refusals.

use thiserror::Error;

/// Errors raised while loading a gallery document.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Malformed gallery document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Post {id} has no image")]
    MissingImage { id: String },

    #[error("Post {id} declares {content_type} content but no source")]
    MissingContent { id: String, content_type: &'static str },

    #[error("Duplicate post id: {id}")]
    DuplicateId { id: String },
}

/// Why the track refused an interaction. Refusals are routine races, so callers
/// log them and carry on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("a drag is in progress or settling")]
    Dragging,

    #[error("an item is still opening")]
    Opening,

    #[error("an item is still closing")]
    Closing,

    #[error("an item is already open")]
    AlreadyOpen,

    #[error("no item is open")]
    NothingOpen,

    #[error("index {index} is outside the track ({len} posts)")]
    OutOfRange { index: usize, len: usize },

    #[error("the track is unmounted")]
    Unmounted,
}
