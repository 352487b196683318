// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admin client creation from the source kubeconfig

use crate::error::{LookoutError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use tracing::{debug, instrument};

/// Create a Kubernetes client from an already parsed kubeconfig
#[instrument(skip(kubeconfig))]
pub async fn create_client(kubeconfig: Kubeconfig, context: Option<&str>) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let client_config = KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| LookoutError::ConfigError(format!("Failed to create config: {}", e)))?;

    debug!("Using API server {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| LookoutError::ConfigError(format!("Failed to create client: {}", e)))
}
