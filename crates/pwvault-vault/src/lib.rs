// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pwvault vault: key clamping, the block codec, the master-key gate,
//! bulk fan-out, entry handlers, and the request router.
//!
//! # Format
//!
//! Each entry is stored as one blob: an 8-byte big-endian length prefix, the
//! secret, and zero padding to a 16-byte boundary, encrypted block by block
//! with AES-256 under the passphrase clamped to 32 bytes. See [`codec`].
//!
//! # Request flow
//!
//! [`VaultRouter::handle`] admits the passphrase through the
//! [`MasterKeyGate`], decodes the payload into a [`MethodRequest`], and runs
//! the matching [`VaultService`] handler.

pub mod codec;
pub mod fanout;
pub mod gate;
pub mod kdf;
pub mod prompt;
pub mod protocol;
pub mod router;
pub mod service;

pub use fanout::fan_out;
pub use gate::MasterKeyGate;
pub use protocol::{Method, MethodRequest, RequestEnvelope, Response};
pub use router::VaultRouter;
pub use service::VaultService;
