//! Shared fixtures for `afcall-core` unit tests.

// ==============================================================================
// Transactions
// ==============================================================================

pub fn sample_json_transaction() -> String {
    serde_json::json!({
        "version": 2,
        "sender": "0x7a",
        "gasData": { "budget": "50000000", "price": "750" },
        "inputs": [],
        "commands": []
    })
    .to_string()
}

/// Base64 of the bytes `[0, 1, 2, 3, 250]`.
pub fn sample_bcs_transaction() -> String {
    "AAECA/o=".to_owned()
}
