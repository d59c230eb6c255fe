// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the pwvault request router.
//!
//! Requests are JSON envelopes posted to `/` or `/v1/vault`. Successful
//! responses are the method-tagged JSON response; failures are a plain-text
//! error message with a status derived from the error's class.

pub mod handlers;
pub mod server;

pub use server::{build_app, start_server, GatewayState, ServerConfig};
