//! Flickr REST client.
//!
//! This module owns remote-specific concerns: request building, the JSON
//! envelope, and typed response models. Everything that interprets a
//! decoded response lives in `crate::resolve`.

pub mod rest;

use serde::Deserialize;

use crate::asset::AssetIdentifier;
use crate::error::FlickrbbError;

pub use rest::RestClient;

/// The three REST operations the converter uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    GetSizes,
    GetInfo,
    GetPhotos,
}

impl Method {
    /// Fully namespaced Flickr method name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::GetSizes => "flickr.photos.getSizes",
            Method::GetInfo => "flickr.photos.getInfo",
            Method::GetPhotos => "flickr.photosets.getPhotos",
        }
    }
}

/// Abstraction over the Flickr API, the seam where tests substitute
/// canned responses for the network.
pub trait FlickrApi {
    fn get_sizes(
        &self,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<SizesResponse, FlickrbbError>;

    fn get_info(&self, id: &AssetIdentifier, api_key: &str)
        -> Result<InfoResponse, FlickrbbError>;

    fn get_set_photos(
        &self,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<SetPhotosResponse, FlickrbbError>;
}

/// One available rendition of a photo, as listed by `getSizes`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SizeDescriptor {
    pub label: String,
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Payload of `flickr.photos.getSizes`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SizesResponse {
    #[serde(default)]
    pub sizes: Option<SizeList>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SizeList {
    #[serde(default)]
    pub size: Vec<SizeDescriptor>,
}

/// Payload of `flickr.photos.getInfo`. Every level is optional so a
/// sparse response decodes to typed absence instead of a parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub photo: Option<PhotoInfo>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PhotoInfo {
    #[serde(default)]
    pub title: Option<Content>,
    #[serde(default)]
    pub description: Option<Content>,
}

/// Flickr wraps text payloads in `{"_content": "..."}` objects.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Content {
    #[serde(rename = "_content", default)]
    pub content: String,
}

/// Payload of `flickr.photosets.getPhotos`. Member order is the order
/// Flickr returned and is preserved all the way to rendering.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SetPhotosResponse {
    #[serde(default)]
    pub photoset: Option<SetPhotos>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SetPhotos {
    #[serde(default)]
    pub photo: Vec<SetMember>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SetMember {
    pub id: String,
    #[serde(default)]
    pub title: String,
}
