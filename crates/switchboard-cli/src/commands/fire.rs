//! `switchboard fire`

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use switchboard_core::Params;
use switchboard_webservice::Switchboard;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

/// Dispatch one operation and print the result.
///
/// Returns whether the result was a success.
pub async fn execute(board: &Switchboard, operation: &str, params: &str, watch: bool) -> Result<bool> {
    let params = parse_params(params)?;
    let mut notifications = watch.then(|| board.notifier().subscribe());

    let result = board.fire(operation, params).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(rx) = notifications.as_mut() {
        loop {
            match rx.try_recv() {
                Ok(note) => println!("{}", serde_json::to_string(&note)?),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "Notifications dropped before they could be printed");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    Ok(result.is_success())
}

/// `--params` must be a JSON object (or `null`).
pub fn parse_params(raw: &str) -> Result<Params> {
    let value: Value = serde_json::from_str(raw).context("--params is not valid JSON")?;
    Params::try_from(value).map_err(|other| anyhow!("--params must be a JSON object, got {}", other))
}
