//! # Configuration
//!
//! Controller configuration resolved from the environment once at startup.
//!
//! There are deliberately no CLI flags: the controller is configured the same
//! way whether it runs in-cluster or against a local kubeconfig. The resolved
//! value is passed into the reconciler at construction time; nothing reads the
//! environment after startup.

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_NAMESPACE, KUBECONFIG_ENV, NAMESPACE_ENV};

/// Startup configuration for the controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Namespace whose ingresses and secrets are reconciled
    pub namespace: String,
    /// Path to a kubeconfig file; `None` means use the in-cluster identity
    pub kubeconfig: Option<PathBuf>,
}

impl ControllerConfig {
    /// Build the configuration from `KUBERNETES_NAMESPACE` and `KUBECONFIG`.
    ///
    /// Unset or empty variables fall back to the `default` namespace and the
    /// in-cluster identity respectively.
    pub fn from_env() -> Self {
        let namespace = env::var(NAMESPACE_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let kubeconfig = env::var(KUBECONFIG_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            namespace,
            kubeconfig,
        }
    }
}
