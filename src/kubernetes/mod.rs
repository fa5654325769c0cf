// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes-backed collaborators: client creation, desired-state listing, and Pod management.

pub mod client;
pub mod desired;
pub mod pods;

pub use client::create_client;
pub use desired::KubeDesiredStateSource;
pub use pods::PodStore;
