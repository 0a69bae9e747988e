//! HTTP caller for the Aftermath JSON API.
//!
//! A [`Caller`] resolves its base URL once from [`CallerConfig::network`] and
//! then issues one request per call: GET without a body, POST with a JSON
//! body. Responses are decoded per [`CallOptions`], optionally wrapped as a
//! [`Transaction`](crate::transaction::Transaction) or a page of events.

mod pagination;
mod url;

pub use pagination::{next_indexer_cursor, DEFAULT_INDEXER_LIMIT};

use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{ApiError, CoreError};
use crate::json::{self, JsonDecoding};
use crate::network::Network;
use crate::transaction::FromSerializedTransaction;
use crate::types::{
    EventsWithCursor, IndexerEventsRequest, IndexerEventsWithCursor, SerializedTransaction,
};

// ==============================================================================
// Configuration
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerConfig {
    /// Without a network every call fails with [`CoreError::MissingBaseUrl`].
    #[serde(default)]
    pub network: Option<Network>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl CallerConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            network: Some(network),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Cancelling the token aborts the in-flight request.
    pub cancel: Option<CancellationToken>,
    pub decoding: JsonDecoding,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_decoding(mut self, decoding: JsonDecoding) -> Self {
        self.decoding = decoding;
        self
    }

    pub fn disable_bigint_json_parsing(self) -> Self {
        self.with_decoding(JsonDecoding::Standard)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

// ==============================================================================
// Caller
// ==============================================================================

/// Base client for one area of the API, addressed by `api_url_prefix`.
///
/// Network and prefix are fixed at construction; the access token can be
/// replaced with [`Caller::set_access_token`] and is read at call time.
#[derive(Debug, Clone)]
pub struct Caller {
    client: reqwest::Client,
    config: CallerConfig,
    api_base_url: Option<String>,
    api_endpoint: &'static str,
    api_url_prefix: String,
}

impl Caller {
    pub fn new(config: CallerConfig, api_url_prefix: impl Into<String>) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config, api_url_prefix))
    }

    /// Build a caller on top of an existing HTTP client and its pool.
    pub fn with_client(
        client: reqwest::Client,
        config: CallerConfig,
        api_url_prefix: impl Into<String>,
    ) -> Self {
        let api_base_url = config
            .network
            .as_ref()
            .map(|network| network.base_url().to_owned());
        let api_endpoint = config
            .network
            .as_ref()
            .map_or("api", Network::api_endpoint);

        Self {
            client,
            config,
            api_base_url,
            api_endpoint,
            api_url_prefix: api_url_prefix.into(),
        }
    }

    /// A caller for another API area sharing this one's client and config.
    pub fn scoped(&self, api_url_prefix: impl Into<String>) -> Self {
        Self::with_client(self.client.clone(), self.config.clone(), api_url_prefix)
    }

    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    pub fn api_endpoint(&self) -> &str {
        self.api_endpoint
    }

    pub fn api_url_prefix(&self) -> &str {
        &self.api_url_prefix
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.config.access_token = Some(access_token.into());
    }

    fn access_token(&self) -> Option<&str> {
        self.config
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    pub fn url_for_api_call(&self, url: &str) -> Result<String, CoreError> {
        url::url_for_api_call(
            self.api_base_url.as_deref(),
            self.api_endpoint,
            &self.api_url_prefix,
            url,
        )
    }

    // ==========================================================================
    // Api Calling
    // ==========================================================================

    /// Issue one request to `url` (relative to this caller's prefix) and
    /// decode the response body as `Output`.
    ///
    /// `None` sends a GET; `Some(body)` sends a POST with `body` as JSON.
    pub async fn fetch_api<Output, Body>(
        &self,
        url: &str,
        body: Option<&Body>,
        options: &CallOptions,
    ) -> Result<Output, CoreError>
    where
        Output: DeserializeOwned,
        Body: Serialize + ?Sized,
    {
        // Configuration errors win over an already-cancelled token.
        let api_call_url = self.url_for_api_call(url)?;
        if options.is_cancelled() {
            return Err(ApiError::Cancelled.into());
        }

        let payload = body.map(|body| json::encode(body)).transpose()?;
        debug!(
            api.url = %api_call_url,
            api.method = if payload.is_some() { "POST" } else { "GET" },
            api.authorized = self.access_token().is_some(),
            "api call"
        );

        let mut builder = match payload {
            None => self.client.get(&api_call_url),
            Some(payload) => self.client.post(&api_call_url).body(payload),
        }
        .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.access_token() {
            builder = builder.bearer_auth(token);
        }

        let exchange = async move {
            let response = builder.send().await.map_err(ApiError::Transport)?;
            let status = response.status();
            let text = response.text().await.map_err(ApiError::Transport)?;
            Ok::<_, ApiError>((status, text))
        };

        // Dropping `exchange` on cancellation aborts the request.
        let (status, text) = match &options.cancel {
            None => exchange.await?,
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(api.url = %api_call_url, "api call cancelled");
                    return Err(ApiError::Cancelled.into());
                }
                result = exchange => result?,
            },
        };
        debug!(api.url = %api_call_url, %status, body_len = text.len(), "api response");
        trace!(api.url = %api_call_url, body = %text, "api response body");

        if !status.is_success() {
            return Err(ApiError::Status { status, body: text }.into());
        }

        json::decode(&text, options.decoding)
    }

    /// Body-less GET shorthand for [`Caller::fetch_api`].
    pub async fn get_api<Output>(&self, url: &str, options: &CallOptions) -> Result<Output, CoreError>
    where
        Output: DeserializeOwned,
    {
        self.fetch_api::<Output, ()>(url, None, options).await
    }

    /// Fetch a serialized transaction and deserialize it into `Tx`.
    pub async fn fetch_api_transaction<Tx, Body>(
        &self,
        url: &str,
        body: Option<&Body>,
        options: &CallOptions,
    ) -> Result<Tx, CoreError>
    where
        Tx: FromSerializedTransaction,
        Body: Serialize + ?Sized,
    {
        let serialized: SerializedTransaction = self.fetch_api(url, body, options).await?;
        Tx::from_serialized(&serialized)
    }

    /// Fetch a page of events whose next cursor is computed by the server.
    pub async fn fetch_api_events<Event, Body>(
        &self,
        url: &str,
        body: &Body,
        options: &CallOptions,
    ) -> Result<EventsWithCursor<Event>, CoreError>
    where
        Event: DeserializeOwned,
        Body: Serialize + ?Sized,
    {
        self.fetch_api(url, Some(body), options).await
    }

    /// Fetch a page of indexer events. The indexer returns a bare list, so the
    /// next cursor is derived from the page size and the request's paging
    /// parameters (see [`next_indexer_cursor`]).
    pub async fn fetch_api_indexer_events<Event, Body>(
        &self,
        url: &str,
        body: &Body,
        options: &CallOptions,
    ) -> Result<IndexerEventsWithCursor<Event>, CoreError>
    where
        Event: DeserializeOwned,
        Body: Serialize + IndexerEventsRequest + ?Sized,
    {
        let events: Vec<Event> = self.fetch_api(url, Some(body), options).await?;
        // TODO: drop once af-fe returns the cursor itself and handles its max-limit clamp.
        let next_cursor = next_indexer_cursor(events.len(), body.limit(), body.cursor())?;
        Ok(IndexerEventsWithCursor {
            events,
            next_cursor,
        })
    }
}
