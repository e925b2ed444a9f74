//! Error types surfaced to the embedding host for display.
//!
//! Every variant is recoverable: the editor keeps its prior state and the
//! host shows a message.

use thiserror::Error;

/// Rejected actions and bad external input
#[derive(Debug, Error)]
pub enum EditorError {
    /// Gate mutation attempted while the layout is locked
    #[error("layout is locked — unlock to edit gates")]
    LayoutLocked,

    /// Path drawing requested outside the locked state
    #[error("lock the layout before drawing a path")]
    NotLocked,

    /// Animation requested with fewer than 2 waypoints
    #[error("trace a path with at least 2 waypoints first")]
    PathNotFlyable,

    /// Malformed track JSON from a load or share link
    #[error("invalid track data: {0}")]
    InvalidTrack(#[from] serde_json::Error),

    /// Share link payload is not valid percent-encoded UTF-8
    #[error("share link is not valid UTF-8")]
    ShareEncoding(#[from] std::string::FromUtf8Error),
}

/// Track library failures. The operation is treated as not-completed; the
/// on-disk library is never overwritten on error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("track storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    /// Existing library file no longer parses; refusing to clobber it
    #[error("track library is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,
}
