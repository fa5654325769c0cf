// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{desired, env as vars, reconcile};
use crate::reconciler::{ReconcilerSettings, RetryPolicy};
use crate::types::Scope;
use anyhow::{bail, Context, Result};
use kube::core::{ApiResource, GroupVersionKind};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// The kind of the desired-state records, resolved without discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredResource {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
}

impl DesiredResource {
    pub fn api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(&self.group, &self.version, &self.kind);
        ApiResource::from_gvk_with_plural(&gvk, &self.plural)
    }
}

impl Default for DesiredResource {
    fn default() -> Self {
        Self {
            group: desired::GROUP.to_string(),
            version: desired::VERSION.to_string(),
            kind: desired::KIND.to_string(),
            plural: desired::PLURAL.to_string(),
        }
    }
}

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub scope: Scope,
    pub desired_resource: DesiredResource,
    pub reconcile_interval: Duration,
    pub request_timeout: Duration,
    /// Extra attempts for a failing desired-state fetch; 0 fails fast
    pub fetch_retries: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scope = Scope::from(lookup(vars::WATCH_NAMESPACE).unwrap_or_default().trim());

        let defaults = DesiredResource::default();
        let desired_resource = DesiredResource {
            group: lookup(vars::DESIRED_GROUP).unwrap_or(defaults.group),
            version: lookup(vars::DESIRED_VERSION).unwrap_or(defaults.version),
            kind: lookup(vars::DESIRED_KIND).unwrap_or(defaults.kind),
            plural: lookup(vars::DESIRED_PLURAL).unwrap_or(defaults.plural),
        };

        let interval_secs: u64 =
            parse_or(&lookup, vars::RECONCILE_INTERVAL_SECS, reconcile::INTERVAL_SECS)?;
        let timeout_secs: u64 = parse_or(
            &lookup,
            vars::REQUEST_TIMEOUT_SECS,
            reconcile::REQUEST_TIMEOUT_SECS,
        )?;
        let fetch_retries: u32 = parse_or(&lookup, vars::FETCH_RETRIES, reconcile::FETCH_RETRIES)?;

        if interval_secs == 0 {
            bail!("{} must be greater than zero", vars::RECONCILE_INTERVAL_SECS);
        }
        if timeout_secs == 0 {
            bail!("{} must be greater than zero", vars::REQUEST_TIMEOUT_SECS);
        }

        Ok(Config {
            scope,
            desired_resource,
            reconcile_interval: Duration::from_secs(interval_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            fetch_retries,
        })
    }

    pub fn reconciler_settings(&self) -> ReconcilerSettings {
        ReconcilerSettings {
            scope: self.scope.clone(),
            interval: self.reconcile_interval,
            request_timeout: self.request_timeout,
            fetch_retry: RetryPolicy {
                retries: self.fetch_retries,
                initial_backoff: Duration::from_secs(reconcile::FETCH_BACKOFF_SECS),
                max_backoff: Duration::from_secs(reconcile::FETCH_BACKOFF_MAX_SECS),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.scope, Scope::All);
        assert_eq!(config.desired_resource, DesiredResource::default());
        assert_eq!(config.reconcile_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.fetch_retries, 3);
    }

    #[test]
    fn test_empty_namespace_means_all() {
        let config = load(&[(vars::WATCH_NAMESPACE, "")]).unwrap();
        assert_eq!(config.scope, Scope::All);
    }

    #[test]
    fn test_namespace_scope() {
        let config = load(&[(vars::WATCH_NAMESPACE, "team-a")]).unwrap();
        assert_eq!(config.scope, Scope::Namespace("team-a".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (vars::DESIRED_GROUP, "apps.example.org"),
            (vars::DESIRED_VERSION, "v1"),
            (vars::DESIRED_KIND, "Bar"),
            (vars::DESIRED_PLURAL, "bars"),
            (vars::RECONCILE_INTERVAL_SECS, "5"),
            (vars::REQUEST_TIMEOUT_SECS, "2"),
            (vars::FETCH_RETRIES, "0"),
        ])
        .unwrap();

        assert_eq!(config.desired_resource.kind, "Bar");
        assert_eq!(config.reconcile_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.fetch_retries, 0);
    }

    #[test]
    fn test_invalid_interval() {
        assert!(load(&[(vars::RECONCILE_INTERVAL_SECS, "soon")]).is_err());
        assert!(load(&[(vars::RECONCILE_INTERVAL_SECS, "0")]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(load(&[(vars::REQUEST_TIMEOUT_SECS, "0")]).is_err());
    }

    #[test]
    fn test_api_resource_uses_plural() {
        let ar = DesiredResource::default().api_resource();

        assert_eq!(ar.group, "example.com");
        assert_eq!(ar.version, "v1alpha1");
        assert_eq!(ar.api_version, "example.com/v1alpha1");
        assert_eq!(ar.kind, "Foo");
        assert_eq!(ar.plural, "foos");
    }

    #[test]
    fn test_reconciler_settings_carry_config() {
        let config = load(&[(vars::FETCH_RETRIES, "7")]).unwrap();
        let settings = config.reconciler_settings();

        assert_eq!(settings.fetch_retry.retries, 7);
        assert_eq!(settings.interval, config.reconcile_interval);
        assert_eq!(settings.scope, Scope::All);
    }
}
