// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{OperatorError, Result};
use kube::api::{DynamicObject, ObjectMeta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The (namespace, name) pair shared by a desired-state record and its managed Pod
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    pub namespace: String,
    pub name: String,
}

impl Identity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Build an identity from object metadata, requiring both name and namespace
    pub fn from_meta(meta: &ObjectMeta) -> Option<Self> {
        let name = meta.name.as_deref().filter(|n| !n.is_empty())?;
        let namespace = meta.namespace.as_deref().filter(|n| !n.is_empty())?;
        Some(Self::new(namespace, name))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Namespace selection for listing desired-state records
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Namespace(String),
}

impl From<&str> for Scope {
    /// The empty string selects all namespaces
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Scope::All
        } else {
            Scope::Namespace(value.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all namespaces"),
            Scope::Namespace(ns) => write!(f, "namespace {}", ns),
        }
    }
}

/// Payload fields of a desired-state record. The reconciler never reads them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    #[serde(default)]
    pub test_string: String,
    #[serde(default)]
    pub test_num: i64,
}

/// A user-declared intent read from the cluster
#[derive(Clone, Debug, PartialEq)]
pub struct DesiredStateRecord {
    pub identity: Identity,
    pub payload: RecordPayload,
}

impl DesiredStateRecord {
    pub fn new(identity: Identity, payload: RecordPayload) -> Self {
        Self { identity, payload }
    }
}

impl TryFrom<DynamicObject> for DesiredStateRecord {
    type Error = OperatorError;

    fn try_from(obj: DynamicObject) -> Result<Self> {
        let identity = Identity::from_meta(&obj.metadata).ok_or_else(|| {
            OperatorError::QueryError(format!(
                "record {:?} is missing a name or namespace",
                obj.metadata.name
            ))
        })?;

        let payload: RecordPayload = serde_json::from_value(obj.data).map_err(|e| {
            OperatorError::QueryError(format!("failed to decode record {}: {}", identity, e))
        })?;

        Ok(Self { identity, payload })
    }
}
