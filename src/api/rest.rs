//! The ureq-backed implementation of [`FlickrApi`].
//!
//! Request building and envelope decoding are pure functions so they can
//! be unit-tested without touching the network; only [`RestClient::fetch`]
//! performs IO.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::asset::AssetIdentifier;
use crate::error::FlickrbbError;

use super::{FlickrApi, InfoResponse, Method, SetPhotosResponse, SizesResponse};

/// The fixed Flickr REST endpoint.
pub const ENDPOINT: &str = "https://www.flickr.com/services/rest/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the GET URL for one API call.
///
/// Fails with `MissingParameter` before any network activity when the api
/// key is empty; the id is validated at construction so only the key can
/// be absent here.
pub fn build_request_url(
    method: Method,
    id: &AssetIdentifier,
    api_key: &str,
) -> Result<url::Url, FlickrbbError> {
    if api_key.trim().is_empty() {
        return Err(FlickrbbError::MissingParameter("api key"));
    }

    let mut request_url =
        url::Url::parse(ENDPOINT).map_err(|source| FlickrbbError::Transport(source.to_string()))?;

    request_url
        .query_pairs_mut()
        .append_pair("method", method.name())
        .append_pair("api_key", api_key.trim())
        .append_pair(id.kind.id_param(), id.value())
        .append_pair("format", "json")
        .append_pair("nojsoncallback", "1");

    Ok(request_url)
}

/// The envelope fields Flickr sets on application-level failures.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    stat: Option<String>,
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a response body, surfacing envelope failures before the typed
/// payload parse so an error body never trips a missing-field decode.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FlickrbbError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    let failed = envelope.stat.as_deref() == Some("fail");
    if failed || envelope.code.is_some_and(|code| code != 0) {
        return Err(FlickrbbError::InvalidAsset {
            code: envelope.code.unwrap_or(0),
            message: envelope
                .message
                .unwrap_or_else(|| "unspecified API failure".to_string()),
        });
    }

    Ok(serde_json::from_str(body)?)
}

/// Blocking HTTP client for the Flickr REST endpoint.
///
/// Holds nothing but the agent: responses are never cached, so sizes and
/// info for the same id are two independent round trips.
pub struct RestClient {
    agent: ureq::Agent,
}

impl RestClient {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: config.into(),
        }
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<T, FlickrbbError> {
        let request_url = build_request_url(method, id, api_key)?;

        let mut response = self
            .agent
            .get(request_url.as_str())
            .call()
            .map_err(|source| FlickrbbError::Transport(source.to_string()))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| FlickrbbError::Transport(source.to_string()))?;

        decode(&body)
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FlickrApi for RestClient {
    fn get_sizes(
        &self,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<SizesResponse, FlickrbbError> {
        self.fetch(Method::GetSizes, id, api_key)
    }

    fn get_info(
        &self,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<InfoResponse, FlickrbbError> {
        self.fetch(Method::GetInfo, id, api_key)
    }

    fn get_set_photos(
        &self,
        id: &AssetIdentifier,
        api_key: &str,
    ) -> Result<SetPhotosResponse, FlickrbbError> {
        self.fetch(Method::GetPhotos, id, api_key)
    }
}
