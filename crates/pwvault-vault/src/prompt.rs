// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master passphrase acquisition via PWVAULT_MASTER_KEY or a TTY prompt.

use pwvault_core::VaultError;
use secrecy::SecretString;

/// The environment variable name for providing the master passphrase.
pub const MASTER_KEY_ENV_VAR: &str = "PWVAULT_MASTER_KEY";

fn from_env() -> Option<SecretString> {
    match std::env::var(MASTER_KEY_ENV_VAR) {
        Ok(key) if !key.is_empty() => Some(SecretString::from(key)),
        _ => None,
    }
}

fn read_hidden(label: &str) -> Result<String, VaultError> {
    eprint!("{label}: ");
    rpassword::read_password()
        .map_err(|e| VaultError::Config(format!("failed to read passphrase: {e}")))
}

fn no_source() -> VaultError {
    VaultError::Config(format!(
        "no master passphrase provided; set {MASTER_KEY_ENV_VAR} or run interactively"
    ))
}

/// Get a new master passphrase from the environment or an interactive prompt.
///
/// Priority:
/// 1. `PWVAULT_MASTER_KEY` (headless use)
/// 2. an `rpassword` TTY prompt, asked twice
///
/// Used when sealing a new master object.
pub fn get_master_passphrase_with_confirm() -> Result<SecretString, VaultError> {
    if let Some(key) = from_env() {
        return Ok(key);
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let first = read_hidden("New master passphrase")?;
        let second = read_hidden("Confirm master passphrase")?;

        if first != second {
            return Err(VaultError::Config("passphrases do not match".to_string()));
        }
        if first.is_empty() {
            return Err(VaultError::Config("empty passphrase not allowed".to_string()));
        }
        return Ok(SecretString::from(first));
    }

    Err(no_source())
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn passphrase_from_env_var() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::set_var(MASTER_KEY_ENV_VAR, "test-passphrase") };
        let result = get_master_passphrase_with_confirm();
        unsafe { std::env::remove_var(MASTER_KEY_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "test-passphrase");
    }

    #[test]
    #[serial]
    fn empty_env_var_is_ignored() {
        unsafe { std::env::set_var(MASTER_KEY_ENV_VAR, "") };
        // Test stdin is not a terminal, so there is no fallback source.
        let result = get_master_passphrase_with_confirm();
        unsafe { std::env::remove_var(MASTER_KEY_ENV_VAR) };

        assert!(matches!(result, Err(VaultError::Config(_))));
    }
}
