//! Interpret decoded API responses: size lookup and metadata extraction.

use crate::api::{InfoResponse, SizesResponse};
use crate::error::FlickrbbError;

/// Title and description of a photo, trimmed, empty when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhotoMetadata {
    pub title: String,
    pub description: String,
}

/// Find the source URL for the requested size label.
///
/// The first descriptor whose label equals the request wins; duplicate
/// labels keep the first match authoritative. An absent size list, an
/// empty label, or no matching descriptor all fail with `SizeNotFound`.
pub fn resolve_size<'a>(
    response: &'a SizesResponse,
    label: &str,
) -> Result<&'a str, FlickrbbError> {
    let not_found = || FlickrbbError::SizeNotFound {
        label: label.to_string(),
    };

    if label.is_empty() {
        return Err(not_found());
    }

    let sizes = response.sizes.as_ref().ok_or_else(not_found)?;
    sizes
        .size
        .iter()
        .find(|descriptor| descriptor.label == label)
        .map(|descriptor| descriptor.source.as_str())
        .ok_or_else(not_found)
}

/// Extract title and description from a `getInfo` response.
///
/// Missing nested fields resolve to the empty string, never to a failure.
pub fn resolve_metadata(response: &InfoResponse) -> PhotoMetadata {
    let Some(photo) = response.photo.as_ref() else {
        return PhotoMetadata::default();
    };

    let text = |content: &Option<crate::api::Content>| {
        content
            .as_ref()
            .map(|value| value.content.trim().to_string())
            .unwrap_or_default()
    };

    PhotoMetadata {
        title: text(&photo.title),
        description: text(&photo.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::rest::decode;

    fn sizes_fixture() -> SizesResponse {
        decode(
            r#"{
                "sizes": {"size": [
                    {"label": "Small", "source": "https://x/s.jpg", "width": 240, "height": 160},
                    {"label": "Medium", "source": "https://x/m.jpg", "width": 500, "height": 333},
                    {"label": "Medium", "source": "https://x/m2.jpg", "width": 500, "height": 333}
                ]},
                "stat": "ok"
            }"#,
        )
        .expect("fixture")
    }

    #[test]
    fn first_matching_label_wins() {
        let response = sizes_fixture();
        assert_eq!(
            resolve_size(&response, "Medium").expect("url"),
            "https://x/m.jpg"
        );
    }

    #[test]
    fn resolve_size_is_idempotent() {
        let response = sizes_fixture();
        let first = resolve_size(&response, "Small").expect("url").to_string();
        let second = resolve_size(&response, "Small").expect("url").to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_label_is_size_not_found() {
        let response = sizes_fixture();
        let err = resolve_size(&response, "Original").expect_err("error");
        match err {
            FlickrbbError::SizeNotFound { label } => assert_eq!(label, "Original"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_label_and_absent_list_are_size_not_found() {
        let response = sizes_fixture();
        assert!(matches!(
            resolve_size(&response, ""),
            Err(FlickrbbError::SizeNotFound { .. })
        ));

        let empty = SizesResponse::default();
        assert!(matches!(
            resolve_size(&empty, "Medium"),
            Err(FlickrbbError::SizeNotFound { .. })
        ));
    }

    #[test]
    fn metadata_is_trimmed() {
        let response: InfoResponse = decode(
            r#"{
                "photo": {
                    "title": {"_content": "  Dawn over the bay "},
                    "description": {"_content": " Shot at 6am.\n"}
                },
                "stat": "ok"
            }"#,
        )
        .expect("fixture");

        let metadata = resolve_metadata(&response);
        assert_eq!(metadata.title, "Dawn over the bay");
        assert_eq!(metadata.description, "Shot at 6am.");
    }

    #[test]
    fn empty_description_content_yields_empty_string() {
        let response: InfoResponse = decode(
            r#"{"photo": {"title": {"_content": "Untitled"}, "description": {"_content": ""}}, "stat": "ok"}"#,
        )
        .expect("fixture");

        let metadata = resolve_metadata(&response);
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn missing_photo_object_yields_defaults() {
        let metadata = resolve_metadata(&InfoResponse::default());
        assert_eq!(metadata, PhotoMetadata::default());
    }
}
