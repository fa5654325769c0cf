// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    /// Listing or decoding the desired-state records failed
    #[error("Failed to query desired state: {0}")]
    QueryError(String),

    /// The managed resource could not be classified as found or absent
    #[error("Failed to probe managed resource: {0}")]
    ProbeError(String),

    #[error("Failed to create managed resource: {detail}")]
    CreateError { detail: String, conflict: bool },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Shutdown requested")]
    Cancelled,
}

impl OperatorError {
    /// Creation lost the race against another writer (HTTP 409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, OperatorError::CreateError { conflict: true, .. })
    }
}

pub type Result<T> = std::result::Result<T, OperatorError>;
