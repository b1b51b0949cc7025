use std::time::Duration;

use jokes_core::{JokeResponse, DEFAULT_AMOUNT};
use jokes_logging::{jokes_debug, jokes_info};
use serde::Deserialize;
use url::Url;

use crate::decode::{decode_response, DecodeError};
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://v2.jokeapi.dev";

/// Provider category path segment. `Any` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum JokeCategory {
    #[default]
    Any,
    Programming,
    Misc,
    Dark,
    Pun,
    Spooky,
    Christmas,
}

impl JokeCategory {
    pub fn as_path(self) -> &'static str {
        match self {
            JokeCategory::Any => "Any",
            JokeCategory::Programming => "Programming",
            JokeCategory::Misc => "Misc",
            JokeCategory::Dark => "Dark",
            JokeCategory::Pun => "Pun",
            JokeCategory::Spooky => "Spooky",
            JokeCategory::Christmas => "Christmas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JokeRequest {
    pub category: JokeCategory,
    pub amount: u32,
}

impl JokeRequest {
    pub fn new(category: JokeCategory, amount: u32) -> Self {
        Self { category, amount }
    }

    pub fn any(amount: u32) -> Self {
        Self::new(JokeCategory::Any, amount)
    }
}

impl Default for JokeRequest {
    fn default() -> Self {
        Self::any(DEFAULT_AMOUNT)
    }
}

/// Client settings. Timeouts are left to the platform unless set.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait JokeClient: Send + Sync {
    /// One request, no retry.
    async fn fetch_jokes(&self, request: &JokeRequest) -> Result<JokeResponse, FetchError>;
}

#[async_trait::async_trait]
impl<C: JokeClient + ?Sized> JokeClient for std::sync::Arc<C> {
    async fn fetch_jokes(&self, request: &JokeRequest) -> Result<JokeResponse, FetchError> {
        (**self).fetch_jokes(request).await
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestJokeClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestJokeClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| {
            FetchError::new(
                FailureKind::InvalidRequest,
                format!("invalid base url {:?}: {err}", settings.base_url),
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidRequest,
                format!("base url {:?} cannot carry a path", settings.base_url),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `<base>/joke/<Category>?amount=<N>`
    pub fn endpoint(&self, request: &JokeRequest) -> Result<Url, FetchError> {
        if request.amount == 0 {
            return Err(FetchError::new(
                FailureKind::InvalidRequest,
                "amount must be at least 1",
            ));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::new(FailureKind::InvalidRequest, "base url cannot be a base"))?
            .pop_if_empty()
            .extend(["joke", request.category.as_path()]);
        url.query_pairs_mut()
            .append_pair("amount", &request.amount.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl JokeClient for ReqwestJokeClient {
    async fn fetch_jokes(&self, request: &JokeRequest) -> Result<JokeResponse, FetchError> {
        let url = self.endpoint(request)?;
        jokes_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The provider explains rejected requests in an `error: true` body.
            let detail = match response.bytes().await.map(|body| decode_response(&body)) {
                Ok(Err(DecodeError::Provider { message })) => message,
                _ => status.to_string(),
            };
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail,
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded = decode_response(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        jokes_info!(
            "Fetched {} jokes from category {} ({} bytes)",
            decoded.amount,
            request.category.as_path(),
            body.len()
        );
        Ok(decoded)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ReqwestJokeClient {
        ReqwestJokeClient::new(ClientSettings {
            base_url: base_url.to_string(),
            ..ClientSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_targets_category_with_amount() {
        let url = client(DEFAULT_BASE_URL)
            .endpoint(&JokeRequest::default())
            .unwrap();
        assert_eq!(url.as_str(), "https://v2.jokeapi.dev/joke/Any?amount=20");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = client("http://127.0.0.1:9000/api/")
            .endpoint(&JokeRequest::new(JokeCategory::Pun, 3))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/joke/Pun?amount=3");
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = client(DEFAULT_BASE_URL)
            .endpoint(&JokeRequest::any(0))
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidRequest);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestJokeClient::new(ClientSettings {
            base_url: "not a url".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidRequest);
    }

    #[test]
    fn category_reads_from_its_path_name() {
        let category: JokeCategory = serde_json::from_str("\"Programming\"").unwrap();
        assert_eq!(category, JokeCategory::Programming);
        assert_eq!(category.as_path(), "Programming");
        assert!(serde_json::from_str::<JokeCategory>("\"Knock\"").is_err());
    }
}
