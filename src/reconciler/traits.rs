// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The narrow contracts the reconciler consumes.
//!
//! The Kubernetes-backed implementations live in `crate::kubernetes`; tests
//! substitute in-memory fakes.

use crate::error::Result;
use crate::types::{DesiredStateRecord, Identity, Scope};
use async_trait::async_trait;

/// Outcome of a successful probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    /// The API reported a structured "not found"; the only signal that authorizes creation
    Absent,
}

/// Read-only access to the desired-state records.
#[async_trait]
pub trait DesiredStateSource: Send + Sync {
    /// Full read of `scope`. Fails with `QueryError` if the call fails or the
    /// payload cannot be decoded.
    async fn list(&self, scope: &Scope) -> Result<Vec<DesiredStateRecord>>;
}

/// Read-only check for the managed resource of an identity.
#[async_trait]
pub trait ActualStateProber: Send + Sync {
    /// Any failure other than "not found" is a `ProbeError`.
    async fn exists(&self, identity: &Identity) -> Result<Presence>;
}

/// Creates the managed resource from the baseline template.
#[async_trait]
pub trait ResourceProvisioner: Send + Sync {
    /// Not idempotent: creating an existing resource surfaces a conflict `CreateError`.
    async fn create(&self, identity: &Identity) -> Result<()>;
}
