// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the pwvault password vault.
//!
//! This crate provides the shared error type, common types, and the
//! [`BlobStore`] trait that every storage collaborator implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VaultError;
pub use traits::BlobStore;
pub use types::{ErrorClass, HealthStatus};
