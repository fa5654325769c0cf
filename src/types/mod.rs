// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the reconciler and its Kubernetes collaborators.

pub mod record;

pub use record::{DesiredStateRecord, Identity, RecordPayload, Scope};
