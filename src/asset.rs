//! Typed identification of Flickr assets.
//!
//! A pasted URL either references a single photo, a photo set, or nothing
//! we recognize. Extraction is deliberately forgiving: it fires on every
//! input change upstream, so a non-match means "not ready", never an error.

use std::fmt;

use url::Url;

/// Which Flickr resource family an identifier belongs to.
///
/// The kind decides both the API method namespace (`flickr.photos.*` vs
/// `flickr.photosets.*`) and the query parameter carrying the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Photo,
    PhotoSet,
}

impl AssetKind {
    /// Query parameter name for this kind of id.
    pub fn id_param(&self) -> &'static str {
        match self {
            AssetKind::Photo => "photo_id",
            AssetKind::PhotoSet => "photoset_id",
        }
    }
}

/// A validated reference to a Flickr photo or photo set.
///
/// Invariant: `value` is a non-empty, digits-only string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetIdentifier {
    pub kind: AssetKind,
    value: String,
}

impl AssetIdentifier {
    /// Build an identifier from a known-numeric id (e.g. a set member).
    ///
    /// Returns `None` if `value` is empty or contains a non-digit.
    pub fn new(kind: AssetKind, value: &str) -> Option<Self> {
        if is_digits(value) {
            Some(Self {
                kind,
                value: value.to_string(),
            })
        } else {
            None
        }
    }

    /// Extract an identifier from a pasted Flickr URL.
    ///
    /// Two shapes are recognized, set first:
    /// - `.../photos/<owner>/sets/<digits>...` → [`AssetKind::PhotoSet`]
    /// - `.../photos/<owner>/<digits>...` → [`AssetKind::Photo`], using the
    ///   last all-digit path segment so trailing context segments such as
    ///   `/in/album-72157.../` do not break extraction.
    ///
    /// Anything else yields `None` — callers treat that as "not ready",
    /// not as a failure.
    pub fn from_url(input: &str) -> Option<Self> {
        let url = Url::parse(input.trim()).ok()?;

        let host = url.host_str()?.to_ascii_lowercase();
        if host != "www.flickr.com" && host != "flickr.com" {
            return None;
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        // The set pattern takes precedence over any numeric segment
        // elsewhere in the path.
        for pair in segments.windows(2) {
            if pair[0] == "sets" && is_digits(pair[1]) {
                return Self::new(AssetKind::PhotoSet, pair[1]);
            }
        }

        if segments.first() != Some(&"photos") {
            return None;
        }

        // Photo id: last all-digit segment after the owner segment.
        segments
            .iter()
            .skip(2)
            .rev()
            .find(|seg| is_digits(seg))
            .and_then(|seg| Self::new(AssetKind::Photo, seg))
    }

    /// The numeric id as a string.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for AssetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_photo_id() {
        let id = AssetIdentifier::from_url("https://www.flickr.com/photos/alice/1234567890/")
            .expect("identifier");
        assert_eq!(id.kind, AssetKind::Photo);
        assert_eq!(id.value(), "1234567890");
    }

    #[test]
    fn trailing_album_context_does_not_break_extraction() {
        let id = AssetIdentifier::from_url(
            "https://www.flickr.com/photos/alice/1234567890/in/album-72157699999999999/",
        )
        .expect("identifier");
        assert_eq!(id.kind, AssetKind::Photo);
        assert_eq!(id.value(), "1234567890");
    }

    #[test]
    fn set_urls_take_precedence() {
        let id = AssetIdentifier::from_url("https://www.flickr.com/photos/alice/sets/555/")
            .expect("identifier");
        assert_eq!(id.kind, AssetKind::PhotoSet);
        assert_eq!(id.value(), "555");
        assert_eq!(id.kind.id_param(), "photoset_id");
    }

    #[test]
    fn bare_host_is_accepted() {
        let id = AssetIdentifier::from_url("https://flickr.com/photos/bob/42").expect("identifier");
        assert_eq!(id.value(), "42");
    }

    #[test]
    fn non_flickr_host_is_not_ready() {
        assert_eq!(
            AssetIdentifier::from_url("https://example.com/photos/alice/123"),
            None
        );
    }

    #[test]
    fn owner_page_without_photo_id_is_not_ready() {
        assert_eq!(
            AssetIdentifier::from_url("https://www.flickr.com/photos/alice/"),
            None
        );
        assert_eq!(
            AssetIdentifier::from_url("https://www.flickr.com/photos/alice/albums"),
            None
        );
    }

    #[test]
    fn partial_input_is_not_ready() {
        assert_eq!(AssetIdentifier::from_url("https://www.fli"), None);
        assert_eq!(AssetIdentifier::from_url(""), None);
    }

    #[test]
    fn new_rejects_non_numeric_ids() {
        assert_eq!(AssetIdentifier::new(AssetKind::Photo, ""), None);
        assert_eq!(AssetIdentifier::new(AssetKind::Photo, "12a4"), None);
    }
}
