//! Named API environments and their base URLs.
//!
//! A [`Network`] is either one of the fixed Aftermath deployments or a
//! literal base URL override. Parsing never fails: any string that is not an
//! exact environment name becomes [`Network::Custom`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAINNET_BASE_URL: &str = "https://aftermath.finance";
pub const TESTNET_BASE_URL: &str = "https://testnet.aftermath.finance";
pub const DEVNET_BASE_URL: &str = "https://devnet.aftermath.finance";
pub const LOCAL_BASE_URL: &str = "http://localhost:3000";
/// Combined with the `af-fe` endpoint segment this yields `http://af-fe/...`.
pub const INTERNAL_BASE_URL: &str = "http://";

const API_ENDPOINT: &str = "api";
const INTERNAL_API_ENDPOINT: &str = "af-fe";

// ==============================================================================
// Network
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Local,
    Internal,
    /// Literal base URL, used verbatim.
    Custom(String),
}

impl Network {
    pub fn base_url(&self) -> &str {
        match self {
            Self::Mainnet => MAINNET_BASE_URL,
            Self::Testnet => TESTNET_BASE_URL,
            Self::Devnet => DEVNET_BASE_URL,
            Self::Local => LOCAL_BASE_URL,
            Self::Internal => INTERNAL_BASE_URL,
            Self::Custom(url) => url,
        }
    }

    /// Path segment placed between the base URL and the caller prefix.
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            Self::Internal => INTERNAL_API_ENDPOINT,
            _ => API_ENDPOINT,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => "MAINNET",
            Self::Testnet => "TESTNET",
            Self::Devnet => "DEVNET",
            Self::Local => "LOCAL",
            Self::Internal => "INTERNAL",
            Self::Custom(url) => url,
        }
    }
}

/// Resolve a network name (or literal URL) to its base URL.
pub fn api_base_url_for_network(network: &str) -> String {
    Network::from(network.to_owned()).base_url().to_owned()
}

impl From<String> for Network {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MAINNET" => Self::Mainnet,
            "TESTNET" => Self::Testnet,
            "DEVNET" => Self::Devnet,
            "LOCAL" => Self::Local,
            "INTERNAL" => Self::Internal,
            _ => Self::Custom(value),
        }
    }
}

impl From<Network> for String {
    fn from(value: Network) -> Self {
        match value {
            Network::Custom(url) => url,
            named => named.as_str().to_owned(),
        }
    }
}

impl FromStr for Network {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_networks_map_to_fixed_base_urls() {
        let cases = [
            ("MAINNET", "https://aftermath.finance"),
            ("TESTNET", "https://testnet.aftermath.finance"),
            ("DEVNET", "https://devnet.aftermath.finance"),
            ("LOCAL", "http://localhost:3000"),
            ("INTERNAL", "http://"),
        ];
        for (name, expected) in cases {
            assert_eq!(api_base_url_for_network(name), expected, "network {name}");
        }
    }

    #[test]
    fn unknown_names_pass_through_unchanged() {
        for raw in ["https://example.com/", "mainnet", "", "http://10.0.0.5:8080"] {
            assert_eq!(api_base_url_for_network(raw), raw);
            assert_eq!(Network::from(raw.to_owned()), Network::Custom(raw.to_owned()));
        }
    }

    #[test]
    fn only_internal_uses_af_fe_endpoint() {
        assert_eq!(Network::Internal.api_endpoint(), "af-fe");
        assert_eq!(Network::Mainnet.api_endpoint(), "api");
        assert_eq!(Network::Custom("http://x".into()).api_endpoint(), "api");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = serde_json::to_string(&Network::Testnet).expect("serialize");
        assert_eq!(json, "\"TESTNET\"");

        let parsed: Network = serde_json::from_str("\"http://localhost:9000\"").expect("parse");
        assert_eq!(parsed, Network::Custom("http://localhost:9000".into()));
        assert_eq!(parsed.to_string(), "http://localhost:9000");
    }
}
