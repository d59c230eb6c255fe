// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics: figment failures rendered through miette,
//! with a "did you mean" hint for misspelled keys.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a fix.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading or validating `pwvault.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a pwvault setting")]
    #[diagnostic(
        code(pwvault::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(pwvault::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("`{key}` must be set")]
    #[diagnostic(
        code(pwvault::config::missing_key),
        help("add `{key} = <value>` to your pwvault.toml")
    )]
    MissingKey { key: String },

    /// Parsed fine but failed [`crate::validation::validate_config`].
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(pwvault::config::validation))]
    Validation { message: String },

    #[error("failed to load configuration: {0}")]
    #[diagnostic(code(pwvault::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? (this section accepts: {valid_keys})"),
        None => format!("this section accepts: {valid_keys}"),
    }
}

/// Flatten a `figment::Error` chain into one diagnostic per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let path = error.path.join(".");
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let suggestion = suggest_key(field, expected);
                    ConfigError::UnknownKey {
                        key: qualify(&path, field),
                        suggestion,
                        valid_keys: expected.join(", "),
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: qualify(&path, field),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: path,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Dotted key for `field` under `path`.
///
/// figment usually reports a path that already ends with the offending
/// field; the field is only appended when it is missing.
fn qualify(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else if path == field || path.ends_with(&format!(".{field}")) {
        path.to_string()
    } else {
        format!("{path}.{field}")
    }
}

/// Closest valid key to `unknown`, if any scores above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Print every error to stderr, graphically when miette can render it.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("pwvault: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_bucket_for_bukcet() {
        let valid = &["backend", "root", "bucket"];
        assert_eq!(suggest_key("bukcet", valid), Some("bucket".to_string()));
    }

    #[test]
    fn suggest_master_object_for_typo() {
        let valid = &["master_object"];
        assert_eq!(
            suggest_key("master_objcet", valid),
            Some("master_object".to_string())
        );
    }

    #[test]
    fn qualify_does_not_repeat_field() {
        assert_eq!(qualify("store.bukcet", "bukcet"), "store.bukcet");
        assert_eq!(qualify("store", "bukcet"), "store.bukcet");
        assert_eq!(qualify("", "bukcet"), "bukcet");
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["host", "port", "max_body_bytes"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }
}
