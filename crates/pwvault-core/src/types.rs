// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the vault, storage, and gateway crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by blob-store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is reachable but something is off.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Status classification carried by every error response.
///
/// The transport maps each class onto its own status codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    /// The caller sent something unusable.
    BadRequest,
    /// Wrong master passphrase or failed integrity check.
    Forbidden,
    /// Storage, cipher, or state failure on our side.
    Internal,
}
