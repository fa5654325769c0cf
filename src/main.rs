// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use baby_operator::config::Config;
use baby_operator::kubernetes::{create_client, KubeDesiredStateSource, PodStore};
use baby_operator::reconciler::Reconciler;
use baby_operator::shutdown::cancel_on_signal;

/// Ensures a Pod exists for every desired-state record in the cluster
#[derive(Parser, Debug)]
#[command(name = "baby-operator", version)]
struct Args {
    /// Path to a kubeconfig file; defaults to in-cluster config or KUBECONFIG
    #[arg(long)]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("Starting baby-operator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: scope={}, kind={}/{} {}, interval={:?}",
        config.scope,
        config.desired_resource.group,
        config.desired_resource.version,
        config.desired_resource.kind,
        config.reconcile_interval
    );

    // Create Kubernetes client
    let client = create_client(args.kubeconfig.as_deref()).await?;
    info!("Connected to Kubernetes cluster");

    let source = KubeDesiredStateSource::new(client.clone(), &config.desired_resource);
    let pods = PodStore::new(client);
    let reconciler = Reconciler::new(source, pods.clone(), pods, config.reconciler_settings());

    // Stop the loop cleanly on SIGTERM or SIGINT
    let shutdown = CancellationToken::new();
    cancel_on_signal(shutdown.clone())?;

    reconciler.run(shutdown).await?;

    info!("baby-operator stopped");
    Ok(())
}
