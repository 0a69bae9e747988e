use afcall_core::Network;
use clap::{Parser, Subcommand};

/// Issue one call against the Aftermath API and print the decoded JSON.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Network name (MAINNET, TESTNET, DEVNET, LOCAL, INTERNAL) or a literal base URL.
    #[arg(long, default_value = "MAINNET", env = "AFCALL_NETWORK")]
    pub network: Network,

    /// Bearer token sent as `Authorization` on every call.
    #[arg(long, env = "AFCALL_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// API area prefix, e.g. `pools` or `staking`.
    #[arg(long, default_value = "", env = "AFCALL_PREFIX")]
    pub prefix: String,

    /// Decode with plain JSON rules; `"123n"` strings are left as strings.
    #[arg(long)]
    pub standard_json: bool,

    /// Print compact instead of pretty JSON.
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// GET a path and print the response.
    Get { url: String },

    /// POST a JSON body to a path and print the response.
    Post {
        url: String,
        #[arg(long, default_value = "{}")]
        body: String,
    },

    /// Fetch one page of events; the server supplies the next cursor.
    Events {
        url: String,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long, requires = "cursor_event_seq")]
        cursor_tx_digest: Option<String>,
        #[arg(long, requires = "cursor_tx_digest")]
        cursor_event_seq: Option<String>,
    },

    /// Fetch indexer events, following cursors for up to `--pages` pages.
    IndexerEvents {
        url: String,
        #[arg(long, default_value = "10")]
        limit: u64,
        #[arg(long)]
        cursor: Option<u64>,
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Fetch a transaction payload and print its serialized form.
    Transaction {
        url: String,
        /// Optional JSON body; without one the payload is fetched with GET.
        #[arg(long)]
        body: Option<String>,
    },
}

impl Command {
    pub fn url(&self) -> &str {
        match self {
            Self::Get { url }
            | Self::Post { url, .. }
            | Self::Events { url, .. }
            | Self::IndexerEvents { url, .. }
            | Self::Transaction { url, .. } => url,
        }
    }
}
