// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Length-framed AES-256 blob encoding for a single secret.
//!
//! Blob layout before encryption:
//!
//! ```text
//! +----------------------+-------------+--------------------+
//! | len(secret) u64 BE   | secret      | zero padding       |
//! +----------------------+-------------+--------------------+
//! |<------------- multiple of 16 bytes, at least 16 ------->|
//! ```
//!
//! Each 16-byte block is then encrypted on its own with AES-256 under the
//! clamped passphrase key (ECB: no IV, no chaining, no tag). Encoding is
//! therefore deterministic and repeated blocks are visible in the output.
//! Existing stored blobs rely on this exact format; hardening it is a
//! versioned format change, not an in-place fix.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use pwvault_core::VaultError;
use zeroize::Zeroizing;

use crate::kdf;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Size of the big-endian length prefix.
pub const LENGTH_PREFIX_LEN: usize = 8;

/// Encoded blob length for a secret of `secret_len` bytes.
pub fn encoded_len(secret_len: usize) -> usize {
    (LENGTH_PREFIX_LEN + secret_len).div_ceil(BLOCK_LEN) * BLOCK_LEN
}

fn cipher_for(passphrase: &str) -> Result<Aes256, VaultError> {
    let key = kdf::derive_key(passphrase);
    Aes256::new_from_slice(&key[..])
        .map_err(|_| VaultError::Internal("failed to initialize AES-256 cipher".to_string()))
}

/// Encrypt `secret` into a block-aligned blob under `passphrase`.
pub fn encode(secret: &[u8], passphrase: &str) -> Result<Vec<u8>, VaultError> {
    let cipher = cipher_for(passphrase)?;

    let mut buf = vec![0u8; encoded_len(secret.len())];
    buf[..LENGTH_PREFIX_LEN].copy_from_slice(&(secret.len() as u64).to_be_bytes());
    buf[LENGTH_PREFIX_LEN..LENGTH_PREFIX_LEN + secret.len()].copy_from_slice(secret);

    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(buf)
}

/// Decrypt a blob produced by [`encode`] and return the framed secret bytes.
///
/// Fails with [`VaultError::Auth`] when the blob is not a positive multiple
/// of 16 bytes or when the decrypted length prefix claims more bytes than
/// the blob holds. A wrong passphrase almost always trips the length check;
/// tampering that keeps the prefix plausible is not detected.
pub fn decode(blob: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    if blob.len() < BLOCK_LEN || blob.len() % BLOCK_LEN != 0 {
        return Err(VaultError::Auth);
    }
    let cipher = cipher_for(passphrase)?;

    let mut buf = Zeroizing::new(blob.to_vec());
    for block in buf.chunks_exact_mut(BLOCK_LEN) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    let mut prefix = [0u8; LENGTH_PREFIX_LEN];
    prefix.copy_from_slice(&buf[..LENGTH_PREFIX_LEN]);
    let claimed = u64::from_be_bytes(prefix);
    let available = (buf.len() - LENGTH_PREFIX_LEN) as u64;
    if claimed > available {
        return Err(VaultError::Auth);
    }

    let end = LENGTH_PREFIX_LEN + claimed as usize;
    Ok(Zeroizing::new(buf[LENGTH_PREFIX_LEN..end].to_vec()))
}

/// [`decode`] as text. Invalid UTF-8 sequences become U+FFFD.
pub fn decode_text(blob: &[u8], passphrase: &str) -> Result<String, VaultError> {
    let secret = decode(blob, passphrase)?;
    Ok(String::from_utf8_lossy(&secret).into_owned())
}
