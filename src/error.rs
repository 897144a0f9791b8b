use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flickrbb operations.
///
/// Every failure the conversion pipeline can hit is an explicit variant,
/// so callers (the CLI, tests, a future UI) can match on the kind instead
/// of inspecting message strings.
#[derive(Debug, Error)]
pub enum FlickrbbError {
    /// A required input was absent before any network call was attempted.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// The HTTP layer reported a non-success status or failed to connect.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API reported the photo or set id as invalid.
    #[error("Flickr API error {code}: {message}")]
    InvalidAsset { code: u64, message: String },

    /// The requested size label matched no descriptor in the response.
    #[error("no size labelled '{label}' in the response")]
    SizeNotFound { label: String },

    /// The resolved image URL was empty at render time.
    #[error("refusing to render an empty image URL")]
    EmptyResult,

    /// The input URL matched neither the photo nor the set shape.
    #[error("not a recognizable Flickr photo or set URL: {0}")]
    UnrecognizedUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode Flickr response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preferences store at {path}: {message}")]
    Prefs { path: PathBuf, message: String },

    #[error("unknown preference field: {0} (supported: api-key, size)")]
    UnknownPreference(String),
}
