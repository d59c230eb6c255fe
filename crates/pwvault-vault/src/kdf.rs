// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase-to-key clamping.
//!
//! The key is the passphrase's raw bytes truncated or zero-padded to exactly
//! 32 bytes. There is no hashing, salt, or iteration: stored blobs depend on
//! this exact mapping, so it cannot be strengthened without a format change.

use zeroize::Zeroizing;

/// Length in bytes of the derived AES-256 key.
pub const KEY_LEN: usize = 32;

/// Derive the 32-byte key for `passphrase`.
///
/// Total and deterministic. The returned key is zeroed on drop.
pub fn derive_key(passphrase: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let bytes = passphrase.as_bytes();
    let used = bytes.len().min(KEY_LEN);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key[..used].copy_from_slice(&bytes[..used]);
    key
}
