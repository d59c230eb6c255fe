// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for pwvault integration tests.
//!
//! # Components
//!
//! - [`ScriptedBlobStore`] - in-memory store with injectable failures, delays, and call counters
//! - [`TestHarness`] - seeded store, router, and gateway app in one place

pub mod harness;
pub mod scripted_store;

pub use harness::{TestHarness, DEFAULT_MASTER_OBJECT, DEFAULT_PASSPHRASE};
pub use scripted_store::ScriptedBlobStore;
