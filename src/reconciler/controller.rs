// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Level-based reconciliation loop: fetch, iterate, pace.

use crate::error::{OperatorError, Result};
use crate::reconciler::retry::RetryPolicy;
use crate::reconciler::traits::{
    ActualStateProber, DesiredStateSource, Presence, ResourceProvisioner,
};
use crate::types::{DesiredStateRecord, Identity, Scope};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    pub scope: Scope,
    /// Sleep between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Deadline applied to every call against the collaborators
    pub request_timeout: Duration,
    pub fetch_retry: RetryPolicy,
}

/// What happened to a single record during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Found,
    Created,
    CreateFailed(String),
    ProbeFailed(String),
}

/// Per-record outcomes of one cycle, in processing order
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub outcomes: Vec<(Identity, RecordOutcome)>,
}

impl CycleReport {
    pub fn found(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Found))
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Created))
    }

    pub fn create_failures(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::CreateFailed(_)))
    }

    pub fn probe_failures(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::ProbeFailed(_)))
    }

    pub fn outcome(&self, identity: &Identity) -> Option<&RecordOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Ensures a managed resource exists for every desired-state record.
///
/// No state is kept between cycles; every cycle re-derives the full
/// desired/actual comparison from the cluster.
pub struct Reconciler<S, P, R> {
    source: S,
    prober: P,
    provisioner: R,
    settings: ReconcilerSettings,
}

impl<S, P, R> Reconciler<S, P, R>
where
    S: DesiredStateSource,
    P: ActualStateProber,
    R: ResourceProvisioner,
{
    pub fn new(source: S, prober: P, provisioner: R, settings: ReconcilerSettings) -> Self {
        Self {
            source,
            prober,
            provisioner,
            settings,
        }
    }

    /// Run cycles until `shutdown` is cancelled.
    ///
    /// Returns `Ok(())` on cancellation and the `QueryError` once the
    /// desired-state fetch has exhausted its retries.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        info!(
            "Starting reconciliation loop for {} every {:?}",
            self.settings.scope, self.settings.interval
        );

        loop {
            match self.reconcile_once(&shutdown).await {
                Ok(report) => {
                    info!(
                        "Cycle complete: {} found, {} created, {} create failures, {} probe failures",
                        report.found(),
                        report.created(),
                        report.create_failures(),
                        report.probe_failures()
                    );
                }
                Err(OperatorError::Cancelled) => break,
                Err(e) => {
                    error!("Giving up on desired state: {}", e);
                    return Err(e);
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = sleep(self.settings.interval) => {}
            }
        }

        info!("Reconciliation loop stopped");
        Ok(())
    }

    /// One fetch and iterate pass.
    ///
    /// Per-record failures end up in the report; only a failed fetch or a
    /// shutdown request is returned as an error.
    pub async fn reconcile_once(&self, shutdown: &CancellationToken) -> Result<CycleReport> {
        let records = self.fetch_desired(shutdown).await?;
        info!(
            "Found {} desired records in {}",
            records.len(),
            self.settings.scope
        );

        let mut report = CycleReport::default();
        for (index, record) in records.iter().enumerate() {
            let identity = &record.identity;
            info!(
                index,
                namespace = %identity.namespace,
                name = %identity.name,
                "Reconciling record"
            );
            let outcome = self.reconcile_record(identity, shutdown).await?;
            report.outcomes.push((identity.clone(), outcome));
        }

        Ok(report)
    }

    async fn fetch_desired(&self, shutdown: &CancellationToken) -> Result<Vec<DesiredStateRecord>> {
        let policy = self.settings.fetch_retry;
        let mut retry = 0;

        loop {
            match self
                .bounded(shutdown, self.source.list(&self.settings.scope))
                .await
            {
                Ok(records) => return Ok(records),
                Err(OperatorError::Cancelled) => return Err(OperatorError::Cancelled),
                Err(e) if retry < policy.retries => {
                    let backoff = policy.backoff(retry);
                    retry += 1;
                    warn!(
                        "Failed to list desired state: {}, retrying in {:?} ({}/{})",
                        e, backoff, retry, policy.retries
                    );
                    tokio::select! {
                        biased;
                        _ = shutdown.cancelled() => return Err(OperatorError::Cancelled),
                        _ = sleep(backoff) => {}
                    }
                }
                Err(e) => return Err(into_query_error(e)),
            }
        }
    }

    #[instrument(skip(self, identity, shutdown), fields(record = %identity))]
    async fn reconcile_record(
        &self,
        identity: &Identity,
        shutdown: &CancellationToken,
    ) -> Result<RecordOutcome> {
        let presence = match self.bounded(shutdown, self.prober.exists(identity)).await {
            Ok(presence) => presence,
            Err(OperatorError::Cancelled) => return Err(OperatorError::Cancelled),
            Err(e) => {
                error!("Failed to get pod {}: {}", identity, e);
                return Ok(RecordOutcome::ProbeFailed(e.to_string()));
            }
        };

        match presence {
            Presence::Found => {
                info!("Found pod {}", identity);
                Ok(RecordOutcome::Found)
            }
            Presence::Absent => {
                info!("Pod {} doesn't exist, creating", identity);
                match self
                    .bounded(shutdown, self.provisioner.create(identity))
                    .await
                {
                    Ok(()) => {
                        info!("Created pod {}", identity);
                        Ok(RecordOutcome::Created)
                    }
                    Err(OperatorError::Cancelled) => Err(OperatorError::Cancelled),
                    Err(e) => {
                        if e.is_conflict() {
                            warn!("Pod {} appeared between probe and create: {}", identity, e);
                        } else {
                            error!("Failed to create pod {}: {}", identity, e);
                        }
                        Ok(RecordOutcome::CreateFailed(e.to_string()))
                    }
                }
            }
        }
    }

    /// Race `call` against the per-call deadline and the shutdown token
    async fn bounded<T, F>(&self, shutdown: &CancellationToken, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let deadline = self.settings.request_timeout;
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("Call interrupted by shutdown");
                Err(OperatorError::Cancelled)
            }
            res = timeout(deadline, call) => res.unwrap_or(Err(OperatorError::Timeout(deadline))),
        }
    }
}

fn into_query_error(e: OperatorError) -> OperatorError {
    match e {
        OperatorError::QueryError(_) => e,
        other => OperatorError::QueryError(other.to_string()),
    }
}
