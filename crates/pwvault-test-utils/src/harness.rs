// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` seeds a [`ScriptedBlobStore`] with a sealed master object
//! and any pre-existing entries, then builds the router and the gateway app
//! on top of it.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use pwvault_core::{BlobStore, VaultError};
use pwvault_gateway::{build_app, GatewayState};
use pwvault_vault::{codec, VaultRouter};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::scripted_store::ScriptedBlobStore;

pub const DEFAULT_PASSPHRASE: &str = "correct-pw";
pub const DEFAULT_MASTER_OBJECT: &str = "master_pw";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    passphrase: String,
    master_object: String,
    entries: Vec<(String, String)>,
    max_body_bytes: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            master_object: DEFAULT_MASTER_OBJECT.to_string(),
            entries: Vec::new(),
            max_body_bytes: 1024 * 1024,
        }
    }

    /// Seal the master object under this passphrase.
    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = passphrase.to_string();
        self
    }

    pub fn with_master_object(mut self, name: &str) -> Self {
        self.master_object = name.to_string();
        self
    }

    /// Pre-store an entry encrypted under the harness passphrase.
    pub fn with_entry(mut self, name: &str, secret: &str) -> Self {
        self.entries.push((name.to_string(), secret.to_string()));
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub async fn build(self) -> Result<TestHarness, VaultError> {
        let store = Arc::new(ScriptedBlobStore::new());

        let master = codec::encode(self.passphrase.as_bytes(), &self.passphrase)?;
        store.put(&self.master_object, master).await?;
        for (name, secret) in &self.entries {
            store
                .put(name, codec::encode(secret.as_bytes(), &self.passphrase)?)
                .await?;
        }

        let shared: Arc<dyn BlobStore> = store.clone();
        let router = Arc::new(VaultRouter::new(shared, self.master_object.clone()));
        let app = build_app(GatewayState::new(Arc::clone(&router)), self.max_body_bytes);

        Ok(TestHarness {
            store,
            router,
            app,
            passphrase: self.passphrase,
            master_object: self.master_object,
        })
    }
}

/// A seeded store, its router, and the gateway app in front of it.
pub struct TestHarness {
    pub store: Arc<ScriptedBlobStore>,
    pub router: Arc<VaultRouter>,
    pub app: axum::Router,
    pub passphrase: String,
    pub master_object: String,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Build the wire envelope for `method` with the harness passphrase.
    pub fn envelope(&self, method: &str, request: Value) -> Value {
        json!({"method": method, "password": self.passphrase, "request": request})
    }

    /// POST a raw body to `/` and return the status and body text.
    pub async fn post_raw(&self, body: String) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .expect("valid request");
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// POST `method` with the harness passphrase.
    pub async fn call(&self, method: &str, request: Value) -> (StatusCode, String) {
        self.post_raw(self.envelope(method, request).to_string()).await
    }

    /// Like [`TestHarness::call`], but parses a successful body as JSON.
    pub async fn call_ok(&self, method: &str, request: Value) -> Value {
        let (status, body) = self.call(method, request).await;
        assert_eq!(status, StatusCode::OK, "unexpected failure: {body}");
        serde_json::from_str(&body).expect("JSON response")
    }
}
