// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Managed Pod lookup and creation

use crate::constants::{pod, OPERATOR_NAME};
use crate::error::{OperatorError, Result};
use crate::reconciler::{ActualStateProber, Presence, ResourceProvisioner};
use crate::types::Identity;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, ContainerPort, Pod, PodSpec};
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Probes and creates the Pods that realize desired-state records
#[derive(Clone)]
pub struct PodStore {
    client: Client,
}

impl PodStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ActualStateProber for PodStore {
    #[instrument(skip(self, identity), fields(pod = %identity))]
    async fn exists(&self, identity: &Identity) -> Result<Presence> {
        match self.api(&identity.namespace).get(&identity.name).await {
            Ok(_) => {
                debug!("Pod {} exists", identity);
                Ok(Presence::Found)
            }
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("Pod {} not found", identity);
                Ok(Presence::Absent)
            }
            Err(e) => Err(OperatorError::ProbeError(format!(
                "failed to get pod {}: {}",
                identity, e
            ))),
        }
    }
}

#[async_trait]
impl ResourceProvisioner for PodStore {
    #[instrument(skip(self, identity), fields(pod = %identity))]
    async fn create(&self, identity: &Identity) -> Result<()> {
        let pp = PostParams {
            field_manager: Some(OPERATOR_NAME.to_string()),
            ..Default::default()
        };

        match self
            .api(&identity.namespace)
            .create(&pp, &managed_pod(identity))
            .await
        {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(err)) if err.code == 409 => Err(OperatorError::CreateError {
                detail: format!("pod {} already exists: {}", identity, err.message),
                conflict: true,
            }),
            Err(e) => Err(OperatorError::CreateError {
                detail: format!("failed to create pod {}: {}", identity, e),
                conflict: false,
            }),
        }
    }
}

/// Baseline Pod for an identity; independent of the record's payload
fn managed_pod(identity: &Identity) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(identity.name.clone()),
            namespace: Some(identity.namespace.clone()),
            labels: Some(BTreeMap::from([(
                pod::MANAGED_BY_LABEL.to_string(),
                OPERATOR_NAME.to_string(),
            )])),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: pod::CONTAINER_NAME.to_string(),
                image: Some(pod::IMAGE.to_string()),
                ports: Some(vec![ContainerPort {
                    container_port: pod::CONTAINER_PORT,
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            restart_policy: Some(pod::RESTART_POLICY.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
