//! HTTP client for the game authority.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use sketch_relay::{
    ApiError, ApiResult, GameApi, ImageData, ResultChain, RoomCode, Username,
    net::messages::{ImageRequest, JoinRequest, PhraseRequest, RawStatus, RawSummary},
};
use std::{
    error::Error as _,
    time::{Duration, Instant},
};

use crate::logging::{log_api_failure, log_api_request};

/// [`GameApi`] over JSON/HTTP.
///
/// One call is one request. Nothing is retried here; the session's pollers
/// simply try again on their next tick.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid server URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            bail!("Server URL '{base_url}' can't have paths appended");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Network(format!("{} can't be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and checks its status. Any non-success answer becomes
    /// [`ApiError::Http`] carrying the response text.
    async fn dispatch(
        &self,
        method: &str,
        url: &Url,
        request: RequestBuilder,
    ) -> ApiResult<Response> {
        let start = Instant::now();
        let sent = request.send().await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                log_api_failure(method, url.path(), duration_ms, &e.to_string());
                return Err(ApiError::Network(describe(&e)));
            }
        };

        let status = response.status();
        log_api_request(method, url.path(), status.as_u16(), duration_ms);
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn post<B>(&self, segments: &[&str], body: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch("POST", &url, request).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let response = self
            .dispatch("GET", &url, self.client.get(url.clone()))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(describe(&e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Flattens a reqwest error and its sources into one line.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl GameApi for ApiClient {
    async fn join(&self, username: &Username, room_code: &RoomCode) -> ApiResult<()> {
        let body = JoinRequest {
            username: username.as_str(),
            game: room_code.as_str(),
        };
        self.post(&["join"], Some(&body)).await
    }

    async fn submit_phrase(
        &self,
        username: &Username,
        room_code: &RoomCode,
        phrase: &str,
    ) -> ApiResult<()> {
        let body = PhraseRequest {
            username: username.as_str(),
            game: room_code.as_str(),
            phrase,
        };
        self.post(&["phrase"], Some(&body)).await
    }

    async fn submit_image(
        &self,
        username: &Username,
        room_code: &RoomCode,
        image: &ImageData,
    ) -> ApiResult<()> {
        let body = ImageRequest {
            username: username.as_str(),
            game: room_code.as_str(),
            image: image.as_data_url(),
        };
        self.post(&["image"], Some(&body)).await
    }

    async fn fetch_player_status(
        &self,
        username: &Username,
        room_code: &RoomCode,
    ) -> ApiResult<RawStatus> {
        self.get(&["game", room_code.as_str(), "player", username.as_str()])
            .await
    }

    async fn fetch_room_summary(&self, room_code: &RoomCode) -> ApiResult<RawSummary> {
        self.get(&["game", room_code.as_str()]).await
    }

    async fn fetch_results(&self, room_code: &RoomCode) -> ApiResult<Vec<ResultChain>> {
        self.get(&["game", room_code.as_str(), "results"]).await
    }

    async fn restart(&self) -> ApiResult<()> {
        self.post::<()>(&["restart"], None).await
    }
}
