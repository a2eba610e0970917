//! # Cluster API
//!
//! Capability interface over the Kubernetes API, plus the kube-backed
//! implementation used in production.
//!
//! The reconciler only ever talks to [`ClusterApi`]; tests drive it with an
//! in-memory fake instead of a live cluster. The production implementation
//! holds namespaced `Api` handles and performs plain synchronous-per-call
//! list/get/replace operations, no watches.

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ListParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info};

use crate::config::ControllerConfig;

/// Cluster operations the reconciler depends on.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List all ingresses in the target namespace
    async fn list_ingresses(&self) -> Result<Vec<Ingress>>;

    /// Fetch one secret by name from the target namespace
    async fn get_secret(&self, name: &str) -> Result<Secret>;

    /// Replace a secret with the given record (last write wins)
    async fn update_secret(&self, secret: &Secret) -> Result<()>;
}

/// Production [`ClusterApi`] backed by a kube client.
#[derive(Clone)]
pub struct KubeClusterApi {
    ingresses: Api<Ingress>,
    secrets: Api<Secret>,
}

impl KubeClusterApi {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            ingresses: Api::namespaced(client.clone(), namespace),
            secrets: Api::namespaced(client, namespace),
        }
    }
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    async fn list_ingresses(&self) -> Result<Vec<Ingress>> {
        let list = self
            .ingresses
            .list(&ListParams::default())
            .await
            .context("listing ingresses")?;
        Ok(list.items)
    }

    async fn get_secret(&self, name: &str) -> Result<Secret> {
        self.secrets
            .get(name)
            .await
            .with_context(|| format!("getting secret {name}"))
    }

    async fn update_secret(&self, secret: &Secret) -> Result<()> {
        let name = secret.metadata.name.as_deref().unwrap_or_default();
        self.secrets
            .replace(name, &PostParams::default(), secret)
            .await
            .with_context(|| format!("updating secret {name}"))?;
        Ok(())
    }
}

/// Build the kube client from the startup configuration.
///
/// A kubeconfig path takes precedence; otherwise the ambient in-cluster
/// identity is used. Failure here is fatal, the caller terminates the process.
pub async fn cluster_client(config: &ControllerConfig) -> Result<Client> {
    let kube_config = match &config.kubeconfig {
        Some(path) => {
            debug!("Using kubeconfig: {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("reading kubeconfig {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .context("building client config from kubeconfig")?
        }
        None => {
            info!("Using in-cluster config");
            Config::incluster().context("resolving in-cluster config")?
        }
    };
    Client::try_from(kube_config).context("constructing Kubernetes client")
}
