// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Desired-state records read through the dynamic API

use crate::config::DesiredResource;
use crate::error::{OperatorError, Result};
use crate::reconciler::DesiredStateSource;
use crate::types::{DesiredStateRecord, Scope};
use async_trait::async_trait;
use kube::api::{ApiResource, DynamicObject, ListParams};
use kube::{Api, Client};
use tracing::{debug, instrument};

/// Lists records of a configured kind. Every call is a full, unfiltered read.
#[derive(Clone)]
pub struct KubeDesiredStateSource {
    client: Client,
    resource: ApiResource,
}

impl KubeDesiredStateSource {
    pub fn new(client: Client, desired: &DesiredResource) -> Self {
        Self {
            client,
            resource: desired.api_resource(),
        }
    }

    fn api(&self, scope: &Scope) -> Api<DynamicObject> {
        match scope {
            Scope::All => Api::all_with(self.client.clone(), &self.resource),
            Scope::Namespace(ns) => Api::namespaced_with(self.client.clone(), ns, &self.resource),
        }
    }
}

#[async_trait]
impl DesiredStateSource for KubeDesiredStateSource {
    #[instrument(skip(self), fields(kind = %self.resource.kind))]
    async fn list(&self, scope: &Scope) -> Result<Vec<DesiredStateRecord>> {
        let list = self
            .api(scope)
            .list(&ListParams::default())
            .await
            .map_err(|e| {
                OperatorError::QueryError(format!(
                    "failed to list {} in {}: {}",
                    self.resource.plural, scope, e
                ))
            })?;

        debug!("Listed {} {} objects", list.items.len(), self.resource.kind);

        list.items
            .into_iter()
            .map(DesiredStateRecord::try_from)
            .collect()
    }
}
