// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name used as field manager and ownership label value
pub const OPERATOR_NAME: &str = "baby-operator";

/// Environment variables read by `Config::from_env`
pub mod env {
    /// Namespace to reconcile; unset or empty means all namespaces
    pub const WATCH_NAMESPACE: &str = "WATCH_NAMESPACE";
    pub const DESIRED_GROUP: &str = "DESIRED_GROUP";
    pub const DESIRED_VERSION: &str = "DESIRED_VERSION";
    pub const DESIRED_KIND: &str = "DESIRED_KIND";
    pub const DESIRED_PLURAL: &str = "DESIRED_PLURAL";
    pub const RECONCILE_INTERVAL_SECS: &str = "RECONCILE_INTERVAL_SECS";
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    pub const FETCH_RETRIES: &str = "FETCH_RETRIES";
}

/// Default desired-state kind (example.com/v1alpha1, Foo)
pub mod desired {
    pub const GROUP: &str = "example.com";
    pub const VERSION: &str = "v1alpha1";
    pub const KIND: &str = "Foo";
    pub const PLURAL: &str = "foos";
}

/// Reconciliation pacing
pub mod reconcile {
    /// Sleep between two cycles
    pub const INTERVAL_SECS: u64 = 1;
    /// Deadline for a single call against the API server
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Extra attempts for a failing desired-state fetch before giving up
    pub const FETCH_RETRIES: u32 = 3;
    /// Initial fetch retry backoff in seconds
    pub const FETCH_BACKOFF_SECS: u64 = 1;
    /// Maximum fetch retry backoff in seconds (exponential backoff cap)
    pub const FETCH_BACKOFF_MAX_SECS: u64 = 30;
}

/// Baseline template for the managed Pod
pub mod pod {
    pub const CONTAINER_NAME: &str = "busybox";
    pub const IMAGE: &str = "registry.k8s.io/echoserver:1.10";
    pub const CONTAINER_PORT: i32 = 8080;
    pub const RESTART_POLICY: &str = "Always";
    pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
}
