// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request router: the gate first, then exhaustive dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use pwvault_core::{BlobStore, VaultError};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::gate::MasterKeyGate;
use crate::protocol::{
    AddResponse, DeleteResponse, ExportPlainResponse, ExportResponse, GetResponse, ListResponse,
    MethodRequest, RequestEnvelope, Response, UpdateResponse,
};
use crate::service::VaultService;

/// Shared request context: one gate and one service over the same store.
#[derive(Debug)]
pub struct VaultRouter {
    gate: MasterKeyGate,
    service: VaultService,
}

impl VaultRouter {
    pub fn new(store: Arc<dyn BlobStore>, master_object: impl Into<String>) -> Self {
        let master_object = master_object.into();
        Self {
            gate: MasterKeyGate::new(Arc::clone(&store), master_object.clone()),
            service: VaultService::new(store, master_object),
        }
    }

    pub fn gate(&self) -> &MasterKeyGate {
        &self.gate
    }

    pub fn service(&self) -> &VaultService {
        &self.service
    }

    /// Admit the envelope's passphrase, decode its payload, and dispatch.
    ///
    /// The passphrase is checked before the method is looked at, so an
    /// unknown method with a wrong passphrase is an auth failure.
    pub async fn handle(&self, envelope: RequestEnvelope) -> Result<Response, VaultError> {
        let passphrase = envelope.password.expose_secret();
        self.gate.ensure(passphrase).await?;

        let request = MethodRequest::parse(&envelope.method, envelope.request)?;
        self.dispatch(request, passphrase).await
    }

    async fn dispatch(
        &self,
        request: MethodRequest,
        passphrase: &str,
    ) -> Result<Response, VaultError> {
        debug!(method = %request.method(), "dispatching request");

        let response = match request {
            MethodRequest::List(_) => Response::List(ListResponse {
                passwords: self.service.list().await?,
            }),
            MethodRequest::Get(req) => Response::Get(GetResponse {
                val: self.service.get(&req.name, passphrase).await?,
            }),
            MethodRequest::Add(req) => {
                self.service.add(&req.name, &req.val, passphrase).await?;
                Response::Add(AddResponse {})
            }
            MethodRequest::Update(req) => {
                self.service.update(&req.name, &req.val, passphrase).await?;
                Response::Update(UpdateResponse {})
            }
            MethodRequest::Delete(req) => {
                self.service.delete(&req.name).await?;
                Response::Delete(DeleteResponse {})
            }
            MethodRequest::Export(_) => Response::Export(ExportResponse {
                passwords: self.service.export().await?.into_iter().collect::<BTreeMap<_, _>>(),
            }),
            MethodRequest::ExportPlain(_) => Response::ExportPlain(ExportPlainResponse {
                passwords: self
                    .service
                    .export_plain(passphrase)
                    .await?
                    .into_iter()
                    .collect::<BTreeMap<_, _>>(),
            }),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use pwvault_storage::MemoryBlobStore;
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::codec;

    const PW: &str = "correct-pw";

    async fn router() -> VaultRouter {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());
        store
            .put("master_pw", codec::encode(PW.as_bytes(), PW).unwrap())
            .await
            .unwrap();
        VaultRouter::new(store, "master_pw")
    }

    fn envelope(value: serde_json::Value) -> RequestEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn full_lifecycle_through_envelopes() {
        let router = router().await;

        let add = envelope(json!({
            "method": "add", "password": PW,
            "request": {"name": "github", "val": "hunter2"}
        }));
        assert_eq!(router.handle(add).await.unwrap(), Response::Add(AddResponse {}));

        let get = envelope(json!({
            "method": "get", "password": PW, "request": {"name": "github"}
        }));
        let Response::Get(got) = router.handle(get).await.unwrap() else {
            panic!("expected get response");
        };
        assert_eq!(got.val, "hunter2");

        let list = envelope(json!({"method": "list", "password": PW}));
        assert_eq!(
            router.handle(list).await.unwrap(),
            Response::List(ListResponse {
                passwords: vec!["github".into(), "master_pw".into()]
            })
        );

        let delete = envelope(json!({
            "method": "delete", "password": PW, "request": {"name": "github"}
        }));
        assert_eq!(router.handle(delete).await.unwrap(), Response::Delete(DeleteResponse {}));
    }

    #[tokio::test]
    async fn wrong_passphrase_is_rejected_before_method_lookup() {
        let router = router().await;
        let env = envelope(json!({"method": "no_such_method", "password": "wrong"}));
        assert!(matches!(router.handle(env).await, Err(VaultError::Auth)));
    }

    #[tokio::test]
    async fn unknown_method_with_right_passphrase_is_malformed() {
        let router = router().await;
        let env = envelope(json!({"method": "no_such_method", "password": PW}));
        let err = router.handle(env).await.unwrap_err();
        assert_eq!(err.to_string(), "malformed request: invalid request method");
    }

    #[tokio::test]
    async fn established_gate_rejects_other_passphrase() {
        let router = router().await;
        router
            .handle(envelope(json!({"method": "list", "password": PW})))
            .await
            .unwrap();
        assert!(router.gate().is_established());

        let err = router
            .handle(envelope(json!({"method": "list", "password": "other"})))
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::Auth));
    }

    #[tokio::test]
    async fn export_plain_includes_master_object() {
        let router = router().await;
        let env = envelope(json!({"method": "export_plain", "password": PW, "request": {}}));
        let Response::ExportPlain(export) = router.handle(env).await.unwrap() else {
            panic!("expected export_plain response");
        };
        assert_eq!(export.passwords.get("master_pw").map(String::as_str), Some(PW));
    }

    #[tokio::test]
    #[traced_test]
    async fn secrets_never_reach_the_log() {
        let router = router().await;
        let add = envelope(json!({
            "method": "add", "password": PW,
            "request": {"name": "github", "val": "hunter2"}
        }));
        router.handle(add).await.unwrap();

        assert!(logs_contain("github"));
        assert!(!logs_contain("hunter2"));
        assert!(!logs_contain(PW));
    }
}
