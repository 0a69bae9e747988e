//! Wire types shared by the caller: event cursors, paginated request bodies
//! and the paginated response shapes.
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Serialized transaction payload as returned by transaction endpoints.
pub type SerializedTransaction = String;

// ==============================================================================
// Event Cursors
// ==============================================================================

/// Position of an on-chain event, used as the server-side event cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    pub tx_digest: String,
    pub event_seq: String,
}

// ==============================================================================
// Request Bodies
// ==============================================================================

/// Body for endpoints whose server computes the next cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventsBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Body for indexer endpoints, which page by numeric offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndexerEventsBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Request bodies that carry indexer paging parameters.
///
/// Endpoint-specific bodies embed extra filters alongside the cursor and
/// limit; implementing this trait lets them reuse client-side cursor
/// derivation.
pub trait IndexerEventsRequest {
    fn cursor(&self) -> Option<u64>;
    fn limit(&self) -> Option<u64>;
}

impl IndexerEventsRequest for ApiIndexerEventsBody {
    fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }
}

impl<T: IndexerEventsRequest + ?Sized> IndexerEventsRequest for &T {
    fn cursor(&self) -> Option<u64> {
        (**self).cursor()
    }

    fn limit(&self) -> Option<u64> {
        (**self).limit()
    }
}

// ==============================================================================
// Paginated Responses
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsWithCursor<T> {
    pub events: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<EventId>,
}

/// A page of indexer events. `next_cursor` is `None` once the stream is
/// exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerEventsWithCursor<T> {
    pub events: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<u64>,
}
