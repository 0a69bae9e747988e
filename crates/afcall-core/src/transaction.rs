//! Deserialization of transaction payloads returned by transaction-building
//! endpoints.
//!
//! A serialized transaction is either a JSON transaction document or the
//! base64 encoding of its BCS bytes. [`Transaction`] keeps whichever form was
//! received so it can be handed to a signer unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::CoreError;

/// Types that can be built from a serialized transaction payload.
pub trait FromSerializedTransaction: Sized {
    fn from_serialized(serialized: &str) -> Result<Self, CoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionData {
    Json(serde_json::Value),
    Bcs(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    data: TransactionData,
}

impl Transaction {
    pub fn from_serialized(serialized: &str) -> Result<Self, CoreError> {
        let trimmed = serialized.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidTransaction("empty payload".to_owned()));
        }

        let data = if trimmed.starts_with('{') {
            let value: serde_json::Value = serde_json::from_str(trimmed)
                .map_err(|e| CoreError::InvalidTransaction(format!("invalid JSON document: {e}")))?;
            if !value.is_object() {
                return Err(CoreError::InvalidTransaction(
                    "JSON document must be an object".to_owned(),
                ));
            }
            TransactionData::Json(value)
        } else {
            let bytes = BASE64
                .decode(trimmed)
                .map_err(|e| CoreError::InvalidTransaction(format!("invalid base64 bytes: {e}")))?;
            TransactionData::Bcs(bytes)
        };

        Ok(Self { data })
    }

    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    /// Document format version, for JSON payloads that declare one.
    pub fn version(&self) -> Option<u64> {
        match &self.data {
            TransactionData::Json(value) => value.get("version").and_then(serde_json::Value::as_u64),
            TransactionData::Bcs(_) => None,
        }
    }

    /// Back to the serialized string form.
    pub fn serialize(&self) -> String {
        match &self.data {
            TransactionData::Json(value) => value.to_string(),
            TransactionData::Bcs(bytes) => BASE64.encode(bytes),
        }
    }
}

impl FromSerializedTransaction for Transaction {
    fn from_serialized(serialized: &str) -> Result<Self, CoreError> {
        Transaction::from_serialized(serialized)
    }
}
