// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request envelope, per-method payloads, and method-tagged responses.
//!
//! Wire shape:
//!
//! ```json
//! {"method": "get", "password": "...", "request": {"name": "github"}}
//! ```
//!
//! answered by `{"get": {"val": "..."}}`. Exactly one method key appears in
//! every response.

use std::collections::BTreeMap;
use std::str::FromStr;

use pwvault_core::VaultError;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Every operation the router accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Method {
    List,
    Get,
    Add,
    Update,
    Delete,
    Export,
    ExportPlain,
}

/// The outer request as it arrives on the wire.
///
/// `method` stays a string here so an unknown method is reported as a
/// malformed request after the passphrase has been checked.
#[derive(Debug, Deserialize)]
pub struct RequestEnvelope {
    pub method: String,
    pub password: SecretString,
    #[serde(default)]
    pub request: Option<serde_json::Value>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRequest {}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GetRequest {
    pub name: String,
}

#[derive(Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddRequest {
    pub name: String,
    pub val: String,
}

#[derive(Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRequest {
    pub name: String,
    pub val: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    pub name: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportRequest {}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPlainRequest {}

impl std::fmt::Debug for AddRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddRequest")
            .field("name", &self.name)
            .field("val", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("name", &self.name)
            .field("val", &"[REDACTED]")
            .finish()
    }
}

/// A decoded request: one variant per method, each owning its payload.
#[derive(Debug, Clone)]
pub enum MethodRequest {
    List(ListRequest),
    Get(GetRequest),
    Add(AddRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    Export(ExportRequest),
    ExportPlain(ExportPlainRequest),
}

impl MethodRequest {
    /// Decode `payload` as the payload of `method`.
    ///
    /// A missing or `null` payload decodes as `{}`. Missing payload fields
    /// take their empty defaults and are rejected later by the handlers.
    pub fn parse(method: &str, payload: Option<serde_json::Value>) -> Result<Self, VaultError> {
        let method = Method::from_str(method)
            .map_err(|_| VaultError::MalformedRequest("invalid request method".to_string()))?;
        let payload = match payload {
            None | Some(serde_json::Value::Null) => {
                serde_json::Value::Object(serde_json::Map::new())
            }
            Some(value) => value,
        };

        Ok(match method {
            Method::List => MethodRequest::List(payload_as(payload)?),
            Method::Get => MethodRequest::Get(payload_as(payload)?),
            Method::Add => MethodRequest::Add(payload_as(payload)?),
            Method::Update => MethodRequest::Update(payload_as(payload)?),
            Method::Delete => MethodRequest::Delete(payload_as(payload)?),
            Method::Export => MethodRequest::Export(payload_as(payload)?),
            Method::ExportPlain => MethodRequest::ExportPlain(payload_as(payload)?),
        })
    }

    pub fn method(&self) -> Method {
        match self {
            MethodRequest::List(_) => Method::List,
            MethodRequest::Get(_) => Method::Get,
            MethodRequest::Add(_) => Method::Add,
            MethodRequest::Update(_) => Method::Update,
            MethodRequest::Delete(_) => Method::Delete,
            MethodRequest::Export(_) => Method::Export,
            MethodRequest::ExportPlain(_) => Method::ExportPlain,
        }
    }
}

fn payload_as<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, VaultError> {
    serde_json::from_value(payload).map_err(|e| VaultError::MalformedRequest(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub passwords: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    pub val: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {}

/// Encrypted blobs keyed by entry name, base64 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(with = "base64_blobs")]
    pub passwords: BTreeMap<String, Vec<u8>>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPlainResponse {
    pub passwords: BTreeMap<String, String>,
}

impl std::fmt::Debug for GetResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetResponse").field("val", &"[REDACTED]").finish()
    }
}

impl std::fmt::Debug for ExportPlainResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPlainResponse")
            .field("passwords", &self.passwords.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Method-tagged response: serializes as `{"<method>": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    List(ListResponse),
    Get(GetResponse),
    Add(AddResponse),
    Update(UpdateResponse),
    Delete(DeleteResponse),
    Export(ExportResponse),
    ExportPlain(ExportPlainResponse),
}

mod base64_blobs {
    use std::collections::BTreeMap;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        blobs: &BTreeMap<String, Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let encoded: BTreeMap<&str, String> = blobs
            .iter()
            .map(|(name, blob)| (name.as_str(), STANDARD.encode(blob)))
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Vec<u8>>, D::Error> {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(name, b64)| {
                STANDARD
                    .decode(b64.as_bytes())
                    .map(|blob| (name, blob))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn method_names_are_snake_case() {
        assert_eq!(Method::ExportPlain.to_string(), "export_plain");
        assert_eq!(Method::from_str("export_plain").unwrap(), Method::ExportPlain);
        assert!(Method::from_str("ExportPlain").is_err());
    }

    #[test]
    fn unknown_method_is_malformed() {
        let err = MethodRequest::parse("rotate", None).unwrap_err();
        assert_eq!(err.to_string(), "malformed request: invalid request method");
    }

    #[test]
    fn missing_or_null_payload_is_empty_object() {
        assert!(matches!(MethodRequest::parse("list", None), Ok(MethodRequest::List(_))));
        let parsed = MethodRequest::parse("get", Some(serde_json::Value::Null)).unwrap();
        assert!(matches!(parsed, MethodRequest::Get(GetRequest { name }) if name.is_empty()));
    }

    #[test]
    fn add_payload_decodes_name_and_val() {
        let parsed =
            MethodRequest::parse("add", Some(json!({"name": "github", "val": "hunter2"}))).unwrap();
        match parsed {
            MethodRequest::Add(req) => {
                assert_eq!(req.name, "github");
                assert_eq!(req.val, "hunter2");
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn ill_typed_payload_is_malformed() {
        let err = MethodRequest::parse("get", Some(json!({"name": 42}))).unwrap_err();
        assert!(matches!(err, VaultError::MalformedRequest(_)));
        let err = MethodRequest::parse("delete", Some(json!("github"))).unwrap_err();
        assert!(matches!(err, VaultError::MalformedRequest(_)));
    }

    #[test]
    fn envelope_without_request_field() {
        let env: RequestEnvelope =
            serde_json::from_value(json!({"method": "list", "password": "pw"})).unwrap();
        assert_eq!(env.method, "list");
        assert!(env.request.is_none());
    }

    #[test]
    fn envelope_debug_redacts_password() {
        let env: RequestEnvelope =
            serde_json::from_value(json!({"method": "list", "password": "hunter2"})).unwrap();
        assert!(!format!("{env:?}").contains("hunter2"));
    }

    #[test]
    fn add_debug_redacts_value() {
        let req = AddRequest { name: "github".into(), val: "hunter2".into() };
        let debug = format!("{req:?}");
        assert!(debug.contains("github"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn responses_carry_exactly_one_method_key() {
        let list = Response::List(ListResponse { passwords: vec!["a".into()] });
        assert_eq!(serde_json::to_value(&list).unwrap(), json!({"list": {"passwords": ["a"]}}));

        let empty = Response::List(ListResponse { passwords: vec![] });
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"list": {"passwords": []}}));

        let add = Response::Add(AddResponse {});
        assert_eq!(serde_json::to_value(&add).unwrap(), json!({"add": {}}));

        let plain = Response::ExportPlain(ExportPlainResponse {
            passwords: BTreeMap::from([("a".to_string(), "x".to_string())]),
        });
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"export_plain": {"passwords": {"a": "x"}}})
        );
    }

    #[test]
    fn export_blobs_are_standard_base64() {
        let export = Response::Export(ExportResponse {
            passwords: BTreeMap::from([("a".to_string(), vec![0xfb, 0xff, 0x00])]),
        });
        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value, json!({"export": {"passwords": {"a": "+/8A"}}}));

        let back: Response = serde_json::from_value(value).unwrap();
        assert_eq!(back, export);
    }
}
