pub mod caller;
pub mod error;
pub mod json;
pub mod network;
pub mod transaction;
pub mod types;

#[cfg(test)]
mod test_util;

pub use caller::{CallOptions, Caller, CallerConfig};
pub use error::{ApiError, CoreError};
pub use json::JsonDecoding;
pub use network::Network;
pub use transaction::{FromSerializedTransaction, Transaction};
pub use types::{
    ApiEventsBody, ApiIndexerEventsBody, EventId, EventsWithCursor, IndexerEventsRequest,
    IndexerEventsWithCursor,
};
