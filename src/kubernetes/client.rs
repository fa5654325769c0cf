// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation and kubeconfig utilities

use crate::error::{OperatorError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::{info, instrument};

/// Create a Kubernetes client from an explicit kubeconfig file, or from the
/// default sources (in-cluster config, `KUBECONFIG`, `~/.kube/config`) when none is given
#[instrument]
pub async fn create_client(kubeconfig_path: Option<&Path>) -> Result<Client> {
    match kubeconfig_path {
        Some(path) => {
            info!("Loading kubeconfig from {}", path.display());
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                OperatorError::KubeconfigError(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            create_client_from_kubeconfig(&contents).await
        }
        None => Ok(Client::try_default().await?),
    }
}

/// Create a Kubernetes client from a kubeconfig string
async fn create_client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed = parse_kubeconfig(kubeconfig)?;

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                OperatorError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| OperatorError::KubeconfigError(format!("Failed to create client: {}", e)))
}

fn parse_kubeconfig(kubeconfig: &str) -> Result<Kubeconfig> {
    serde_yaml::from_str(kubeconfig)
        .map_err(|e| OperatorError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))
}
