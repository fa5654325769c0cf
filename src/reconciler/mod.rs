// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Periodic reconciliation of desired-state records into managed Pods.

pub mod controller;
pub mod retry;
pub mod traits;

pub use controller::{CycleReport, RecordOutcome, Reconciler, ReconcilerSettings};
pub use retry::RetryPolicy;
pub use traits::{ActualStateProber, DesiredStateSource, Presence, ResourceProvisioner};
