mod cli;

use afcall_core::transaction::TransactionData;
use afcall_core::{
    ApiError, ApiEventsBody, ApiIndexerEventsBody, CallOptions, Caller, CallerConfig, CoreError,
    EventId, JsonDecoding, Transaction,
};
use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // stdout carries the JSON result only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let config = CallerConfig {
        network: Some(args.network.clone()),
        access_token: args.access_token.clone(),
    };
    let caller = Caller::new(config, args.prefix.as_str()).context("build API caller")?;

    // Ctrl-C drops the in-flight request instead of killing the process mid-write.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted; cancelling request");
                cancel.cancel();
            }
        });
    }

    let decoding = if args.standard_json {
        JsonDecoding::Standard
    } else {
        JsonDecoding::BigInt
    };
    let options = CallOptions::new()
        .with_cancellation(cancel)
        .with_decoding(decoding);

    tracing::info!(
        network = %args.network,
        endpoint = caller.api_endpoint(),
        prefix = caller.api_url_prefix(),
        "calling API"
    );

    let output = run(&caller, &args.command, &options).await?;
    let rendered = if args.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    }
    .context("render output")?;
    println!("{rendered}");

    Ok(())
}

async fn run(caller: &Caller, command: &Command, options: &CallOptions) -> eyre::Result<Value> {
    let url = command.url();
    let fail = |err: CoreError| {
        let target = caller
            .url_for_api_call(url)
            .unwrap_or_else(|_| url.to_owned());
        eyre!(format_call_error(&target, &err)).wrap_err("API call failed")
    };

    match command {
        Command::Get { .. } => caller.get_api(url, options).await.map_err(fail),
        Command::Post { body, .. } => {
            let body = parse_body(body)?;
            caller
                .fetch_api(url, Some(&body), options)
                .await
                .map_err(fail)
        }
        Command::Events {
            limit,
            cursor_tx_digest,
            cursor_event_seq,
            ..
        } => {
            let cursor = match (cursor_tx_digest, cursor_event_seq) {
                (Some(tx_digest), Some(event_seq)) => Some(EventId {
                    tx_digest: tx_digest.clone(),
                    event_seq: event_seq.clone(),
                }),
                _ => None,
            };
            let body = ApiEventsBody {
                cursor,
                limit: *limit,
            };
            let page = caller
                .fetch_api_events::<Value, _>(url, &body, options)
                .await
                .map_err(fail)?;
            serde_json::to_value(page).context("render events page")
        }
        Command::IndexerEvents {
            limit,
            cursor,
            pages,
            ..
        } => {
            let mut body = ApiIndexerEventsBody {
                cursor: *cursor,
                limit: Some(*limit),
            };
            let mut events = Vec::new();
            let mut next_cursor = None;
            for page_index in 0..*pages {
                let page = caller
                    .fetch_api_indexer_events::<Value, _>(url, &body, options)
                    .await
                    .map_err(fail)?;
                tracing::debug!(
                    page = page_index,
                    events = page.events.len(),
                    next_cursor = ?page.next_cursor,
                    "indexer page"
                );
                events.extend(page.events);
                next_cursor = page.next_cursor;
                match next_cursor {
                    Some(next) => body.cursor = Some(next),
                    None => break,
                }
            }
            Ok(json!({ "events": events, "nextCursor": next_cursor }))
        }
        Command::Transaction { body, .. } => {
            let body = body.as_deref().map(parse_body).transpose()?;
            let tx: Transaction = caller
                .fetch_api_transaction(url, body.as_ref(), options)
                .await
                .map_err(fail)?;
            Ok(describe_transaction(&tx))
        }
    }
}

fn parse_body(raw: &str) -> eyre::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("request body is not valid JSON: {raw}"))
}

fn describe_transaction(tx: &Transaction) -> Value {
    let format = match tx.data() {
        TransactionData::Json(_) => "json",
        TransactionData::Bcs(_) => "bcs",
    };
    json!({
        "format": format,
        "version": tx.version(),
        "serialized": tx.serialize(),
    })
}

fn format_call_error(url: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("request to `{url}` failed"),
        format!("error: {err}"),
    ];

    let hint = match err {
        CoreError::MissingBaseUrl => {
            Some("hint: no base URL; set --network or AFCALL_NETWORK".to_owned())
        }
        CoreError::Api(ApiError::Status { status, .. }) => match status.as_u16() {
            401 | 403 => Some(format!(
                "hint: authentication failed ({status}); verify --access-token or AFCALL_ACCESS_TOKEN"
            )),
            404 => Some(
                "hint: endpoint path is invalid; verify --prefix and the call path".to_owned(),
            ),
            _ => Some(format!("hint: server answered {status}")),
        },
        CoreError::Api(ApiError::Transport(source)) if source.is_connect() => Some(
            "hint: could not connect; verify the network name or base URL and your connectivity"
                .to_owned(),
        ),
        CoreError::Api(ApiError::Cancelled) => Some("hint: the call was interrupted".to_owned()),
        CoreError::Decode(_) => {
            Some("hint: the response was not JSON of the expected shape".to_owned())
        }
        _ => None,
    };
    lines.extend(hint);

    lines.join("\n")
}
