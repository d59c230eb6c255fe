// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent per-entry retrieval merged into one map.

use std::collections::HashMap;
use std::future::Future;

use pwvault_core::VaultError;
use tokio::task::JoinSet;
use tracing::debug;

/// Run `fetch` for every name concurrently and merge the results.
///
/// All tasks are spawned before any is awaited, and every task is awaited
/// before this returns, so nothing outlives the call. On failure the first
/// error in completion order is returned verbatim and every other result is
/// discarded. A panicked task surfaces as [`VaultError::Internal`].
pub async fn fan_out<V, F, Fut>(
    names: Vec<String>,
    fetch: F,
) -> Result<HashMap<String, V>, VaultError>
where
    V: Send + 'static,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<V, VaultError>> + Send + 'static,
{
    let total = names.len();
    let mut tasks = JoinSet::new();
    for name in names {
        let work = fetch(name.clone());
        tasks.spawn(async move { (name, work.await) });
    }

    let mut merged = HashMap::with_capacity(total);
    let mut first_error: Option<VaultError> = None;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(value))) => {
                if first_error.is_none() {
                    merged.insert(name, value);
                }
            }
            Ok((name, Err(e))) => {
                debug!(name = %name, error = %e, "fan-out fetch failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(VaultError::Internal(format!("fan-out task failed: {e}")));
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(merged),
    }
}
