//! Conversion orchestration: extractor → client → resolver, for both the
//! single-photo and the set-expansion path.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::FlickrApi;
use crate::asset::{AssetIdentifier, AssetKind};
use crate::error::FlickrbbError;
use crate::resolve::{resolve_metadata, resolve_size, PhotoMetadata};

/// Monotonic token identifying one conversion request.
///
/// In-flight requests are never cancelled, so a slow request can finish
/// after a newer one started; sinks compare generations to drop the
/// stale outcome instead of letting it overwrite fresher output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resolved photo: the chosen size's URL plus its caption text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    pub image_url: String,
    pub caption: String,
}

impl ConversionResult {
    /// BBCode block for this result, exactly the shape forums expect.
    pub fn bbcode(&self) -> String {
        format!("[IMG]{}[/IMG]\n[I]{}[/I]\n\n", self.image_url, self.caption)
    }
}

/// The outcome of one conversion request: an ordered sequence of results
/// (one element for a photo, one per member for a set) tagged with the
/// request's generation.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub generation: Generation,
    pub results: Vec<ConversionResult>,
}

impl Outcome {
    /// Whether a newer request was started after this one.
    pub fn is_stale(&self, latest: Generation) -> bool {
        self.generation < latest
    }
}

/// Sequences the conversion pipeline over a [`FlickrApi`] implementation.
pub struct Converter<A: FlickrApi> {
    api: A,
    generation: AtomicU64,
}

impl<A: FlickrApi> Converter<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    /// The most recently issued generation.
    pub fn latest(&self) -> Generation {
        Generation(self.generation.load(Ordering::SeqCst))
    }

    /// Convert a pasted URL. `None` from the extractor becomes
    /// `UnrecognizedUrl` here because reaching this point means a
    /// conversion was explicitly requested.
    pub fn convert_url(
        &self,
        url: &str,
        size_label: &str,
        api_key: &str,
    ) -> Result<Outcome, FlickrbbError> {
        let id = AssetIdentifier::from_url(url)
            .ok_or_else(|| FlickrbbError::UnrecognizedUrl(url.to_string()))?;
        self.convert(&id, size_label, api_key)
    }

    /// Convert an already-extracted identifier, dispatching on its kind.
    pub fn convert(
        &self,
        id: &AssetIdentifier,
        size_label: &str,
        api_key: &str,
    ) -> Result<Outcome, FlickrbbError> {
        let generation = Generation(self.generation.fetch_add(1, Ordering::SeqCst) + 1);

        let results = match id.kind {
            AssetKind::Photo => vec![self.convert_photo(id, size_label, api_key)?],
            AssetKind::PhotoSet => self.expand_set(id, size_label, api_key)?,
        };

        Ok(Outcome {
            generation,
            results,
        })
    }

    fn convert_photo(
        &self,
        id: &AssetIdentifier,
        size_label: &str,
        api_key: &str,
    ) -> Result<ConversionResult, FlickrbbError> {
        let sizes = self.api.get_sizes(id, api_key)?;
        let image_url = resolve_size(&sizes, size_label)?.to_string();

        let info = self.api.get_info(id, api_key)?;
        let metadata = resolve_metadata(&info);

        Ok(ConversionResult {
            image_url,
            caption: caption_for(&metadata),
        })
    }

    /// Expand a set strictly in the order Flickr returned its members,
    /// one member at a time. Photo i must finish (or fail) before photo
    /// i+1 starts, so incremental rendering preserves set order.
    fn expand_set(
        &self,
        id: &AssetIdentifier,
        size_label: &str,
        api_key: &str,
    ) -> Result<Vec<ConversionResult>, FlickrbbError> {
        let set = self.api.get_set_photos(id, api_key)?;
        let members = set.photoset.map(|photos| photos.photo).unwrap_or_default();

        let mut results = Vec::with_capacity(members.len());
        for member in members {
            let member_id = AssetIdentifier::new(AssetKind::Photo, &member.id)
                .ok_or(FlickrbbError::MissingParameter("set member id"))?;
            results.push(self.convert_photo(&member_id, size_label, api_key)?);
        }

        Ok(results)
    }
}

/// Caption text: the description when present, otherwise the title.
fn caption_for(metadata: &PhotoMetadata) -> String {
    if metadata.description.is_empty() {
        metadata.title.clone()
    } else {
        metadata.description.clone()
    }
}
