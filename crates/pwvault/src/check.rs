// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pwvault check` command implementation.
//!
//! Verifies that the configured store is reachable and that a plausible
//! master object is present. Never asks for or uses the passphrase.

use std::io::IsTerminal;

use pwvault_config::PwvaultConfig;
use pwvault_core::{BlobStore, HealthStatus, VaultError};
use pwvault_vault::codec::BLOCK_LEN;

/// Status of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

/// Run `pwvault check`; fails if any check fails.
pub async fn run_check(config: &PwvaultConfig, plain: bool) -> Result<(), VaultError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = match pwvault_storage::open_store(&config.store).await {
        Ok(store) => collect_checks(store.as_ref(), &config.vault.master_object).await,
        Err(e) => vec![CheckResult::new("store", CheckStatus::Fail, e.to_string())],
    };

    println!();
    println!("  pwvault check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("  {} {:<14} {}", symbol(&result.status, use_color), result.name, result.message);
    }
    println!();

    let failed = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    if failed > 0 {
        return Err(VaultError::Internal(format!("{failed} check(s) failed")));
    }
    Ok(())
}

fn symbol(status: &CheckStatus, use_color: bool) -> String {
    let plain = match status {
        CheckStatus::Pass => "[OK]  ",
        CheckStatus::Warn => "[WARN]",
        CheckStatus::Fail => "[FAIL]",
    };
    if !use_color {
        return plain.to_string();
    }

    use colored::Colorize;
    match status {
        CheckStatus::Pass => plain.green().to_string(),
        CheckStatus::Warn => plain.yellow().to_string(),
        CheckStatus::Fail => plain.red().to_string(),
    }
}

/// Store health, master object presence, and master blob shape.
pub async fn collect_checks(store: &dyn BlobStore, master_object: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(match store.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("store", CheckStatus::Pass, format!("{} store healthy", store.name()))
        }
        Ok(HealthStatus::Degraded(detail)) => CheckResult::new("store", CheckStatus::Warn, detail),
        Ok(HealthStatus::Unhealthy(detail)) => {
            CheckResult::new("store", CheckStatus::Fail, detail)
        }
        Err(e) => CheckResult::new("store", CheckStatus::Fail, e.to_string()),
    });

    let blob = match store.get(master_object).await {
        Ok(blob) => blob,
        Err(VaultError::NotFound { .. }) => {
            results.push(CheckResult::new(
                "master object",
                CheckStatus::Fail,
                format!("'{master_object}' missing; run `pwvault seal-master`"),
            ));
            return results;
        }
        Err(e) => {
            results.push(CheckResult::new("master object", CheckStatus::Fail, e.to_string()));
            return results;
        }
    };

    results.push(CheckResult::new(
        "master object",
        CheckStatus::Pass,
        format!("'{master_object}' present"),
    ));
    results.push(if blob.len() >= BLOCK_LEN && blob.len() % BLOCK_LEN == 0 {
        CheckResult::new("master format", CheckStatus::Pass, format!("{} bytes", blob.len()))
    } else {
        CheckResult::new(
            "master format",
            CheckStatus::Fail,
            format!("{} bytes is not a positive multiple of {BLOCK_LEN}", blob.len()),
        )
    });

    match store.list().await {
        Ok(names) => results.push(CheckResult::new(
            "entries",
            CheckStatus::Pass,
            format!("{} stored objects", names.len()),
        )),
        Err(e) => results.push(CheckResult::new("entries", CheckStatus::Fail, e.to_string())),
    }

    results
}

#[cfg(test)]
mod tests {
    use pwvault_storage::MemoryBlobStore;
    use pwvault_vault::codec;

    use super::*;

    fn status_of<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckStatus {
        &results.iter().find(|r| r.name == name).unwrap().status
    }

    #[tokio::test]
    async fn sealed_store_passes() {
        let store = MemoryBlobStore::new();
        store.put("master_pw", codec::encode(b"pw", "pw").unwrap()).await.unwrap();

        let results = collect_checks(&store, "master_pw").await;
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn missing_master_fails() {
        let store = MemoryBlobStore::new();
        let results = collect_checks(&store, "master_pw").await;
        assert_eq!(status_of(&results, "store"), &CheckStatus::Pass);
        assert_eq!(status_of(&results, "master object"), &CheckStatus::Fail);
    }

    #[tokio::test]
    async fn misshapen_master_fails_format() {
        let store = MemoryBlobStore::new();
        store.put("master_pw", vec![0; 20]).await.unwrap();
        let results = collect_checks(&store, "master_pw").await;
        assert_eq!(status_of(&results, "master format"), &CheckStatus::Fail);
    }

    #[test]
    fn plain_symbols_have_no_escape_codes() {
        assert_eq!(symbol(&CheckStatus::Fail, false), "[FAIL]");
    }
}
