//! Process bootstrap: logging, configuration, cluster client, then the
//! reconciliation loop. Only a startup connection failure terminates the
//! process; every steady-state error is handled inside the loop.

use anyhow::{Context, Result};
use tracing::{debug, info};

use ingress_auth_controller::cluster::{self, KubeClusterApi};
use ingress_auth_controller::config::ControllerConfig;
use ingress_auth_controller::constants::RECONCILE_INTERVAL;
use ingress_auth_controller::reconciler::Reconciler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingress_auth_controller=debug".into()),
        )
        .init();

    info!(
        "Starting ingress auth controller v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = ControllerConfig::from_env();
    debug!("Namespace: {}", config.namespace);

    let client = cluster::cluster_client(&config)
        .await
        .context("Kubernetes connection failed")?;

    let api = KubeClusterApi::new(client, &config.namespace);
    Reconciler::new(api, RECONCILE_INTERVAL).run().await;
    Ok(())
}
