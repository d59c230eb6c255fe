// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pwvault serve` command implementation.

use std::sync::Arc;

use pwvault_config::PwvaultConfig;
use pwvault_core::VaultError;
use pwvault_gateway::{start_server, GatewayState, ServerConfig};
use pwvault_vault::VaultRouter;
use tracing::{info, warn};

use crate::shutdown;

/// Open the store, build the router, and serve the gateway until a signal.
pub async fn run_serve(config: PwvaultConfig) -> Result<(), VaultError> {
    let store = pwvault_storage::open_store(&config.store).await?;

    let master_object = config.vault.master_object.clone();
    if !store.exists(&master_object).await? {
        warn!(
            object = %master_object,
            "master object missing; every request will fail until `pwvault seal-master` is run"
        );
    }

    let router = Arc::new(VaultRouter::new(store, master_object));
    let server_config = ServerConfig::from(&config.gateway);
    let cancel = shutdown::install_signal_handler();

    info!(
        bucket = %config.store.bucket,
        master_object = %config.vault.master_object,
        "pwvault serve starting"
    );
    start_server(&server_config, GatewayState::new(router), cancel).await?;
    info!("pwvault serve shutdown complete");
    Ok(())
}
