//! # Constants
//!
//! Shared constants used throughout the controller.

use std::time::Duration;

/// Annotation on Ingress resources naming the companion basic-auth secret
pub const AUTH_SECRET_ANNOTATION: &str = "ingress.kubernetes.io/auth-secret";

/// Secret data key holding the plaintext username before sealing
pub const USERNAME_KEY: &str = "username";

/// Secret data key holding the plaintext password before sealing
pub const PASSWORD_KEY: &str = "password";

/// Secret data key holding the derived `username:hash` line after sealing
pub const AUTH_KEY: &str = "auth";

/// Fixed delay between reconciliation cycles
pub const RECONCILE_INTERVAL: Duration = Duration::from_secs(5);

/// Environment variable selecting the namespace to reconcile
pub const NAMESPACE_ENV: &str = "KUBERNETES_NAMESPACE";

/// Environment variable pointing at a kubeconfig file for out-of-cluster runs
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Namespace used when `KUBERNETES_NAMESPACE` is unset
pub const DEFAULT_NAMESPACE: &str = "default";
