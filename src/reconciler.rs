//! # Reconciler
//!
//! The polling reconciliation loop.
//!
//! Every cycle lists the namespace's ingresses, collects the secret names
//! referenced by the `ingress.kubernetes.io/auth-secret` annotation, and seals
//! each referenced secret that still carries plaintext credentials. The loop
//! is stateless across cycles: eligibility is re-derived from cluster state
//! every time, which is also what makes a lost update self-healing.
//!
//! Failure isolation:
//! - a failed ingress list skips the whole cycle,
//! - a failed secret get, hash, or update skips that item only.
//!
//! Items are processed sequentially; cycles never overlap.

use std::time::Duration;

use anyhow::Result;
use k8s_openapi::api::networking::v1::Ingress;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cluster::ClusterApi;
use crate::constants::AUTH_SECRET_ANNOTATION;
use crate::transform::{self, Outcome, SkipReason};

/// Counters for one reconciliation cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Secret names referenced by ingress annotations (duplicates included)
    pub referenced: usize,
    /// Secrets sealed and persisted this cycle
    pub sealed: usize,
    /// Secrets left untouched (already sealed or not ready)
    pub unchanged: usize,
    /// Items that failed to fetch, hash, or persist
    pub failed: usize,
}

/// Drives [`ClusterApi`] through the seal transform on a fixed cadence.
pub struct Reconciler<A> {
    api: A,
    interval: Duration,
}

impl<A: ClusterApi> Reconciler<A> {
    pub fn new(api: A, interval: Duration) -> Self {
        Self { api, interval }
    }

    /// Run reconciliation cycles forever.
    ///
    /// One cycle per tick, strictly sequential. A cycle that fails to list
    /// ingresses is logged and skipped; the next tick retries from scratch.
    pub async fn run(&self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.reconcile_once().await {
                Ok(stats) if stats.sealed > 0 || stats.failed > 0 => {
                    info!(
                        "Cycle done: {} referenced, {} sealed, {} unchanged, {} failed",
                        stats.referenced, stats.sealed, stats.unchanged, stats.failed
                    );
                }
                Ok(stats) => {
                    debug!("Cycle done: {} referenced, nothing to do", stats.referenced);
                }
                Err(e) => {
                    error!("Ingress list failed, skipping cycle: {e:#}");
                }
            }
        }
    }

    /// Run exactly one reconciliation cycle.
    ///
    /// Returns `Err` only when the ingress list itself fails; every per-item
    /// failure is logged, counted, and isolated from the remaining items.
    pub async fn reconcile_once(&self) -> Result<CycleStats> {
        let ingresses = self.api.list_ingresses().await?;
        let names = referenced_secret_names(&ingresses);

        let mut stats = CycleStats {
            referenced: names.len(),
            ..CycleStats::default()
        };
        for name in &names {
            self.process_secret(name, &mut stats).await;
        }
        Ok(stats)
    }

    async fn process_secret(&self, name: &str, stats: &mut CycleStats) {
        let secret = match self.api.get_secret(name).await {
            Ok(secret) => secret,
            Err(e) => {
                error!("Get secret {name} failed: {e:#}");
                stats.failed += 1;
                return;
            }
        };

        let data = secret.data.clone().unwrap_or_default();
        match transform::seal(&data) {
            Ok(Outcome::Unchanged(reason)) => {
                match reason {
                    SkipReason::AlreadySealed => {}
                    SkipReason::MissingUsername => {
                        debug!("Secret {name}: username not found, not ready");
                    }
                    SkipReason::MissingPassword => {
                        debug!("Secret {name}: password not found, not ready");
                    }
                }
                stats.unchanged += 1;
            }
            Ok(Outcome::Sealed(sealed)) => {
                let mut updated = secret;
                updated.data = Some(sealed);
                // No retry and no read-after-write check: if this update is
                // lost, the secret is still unsealed next cycle and gets
                // re-attempted then.
                match self.api.update_secret(&updated).await {
                    Ok(()) => {
                        info!("Secret {name} sealed");
                        stats.sealed += 1;
                    }
                    Err(e) => {
                        error!("Update of secret {name} failed: {e:#}");
                        stats.failed += 1;
                    }
                }
            }
            Err(e) => {
                error!("Password hash for secret {name} failed: {e}");
                stats.failed += 1;
            }
        }
    }
}

/// Collect the secret names referenced by the auth-secret annotation, in
/// listing order. Duplicates are kept and processed redundantly; the seal
/// transform makes the repeats no-ops.
pub fn referenced_secret_names(ingresses: &[Ingress]) -> Vec<String> {
    ingresses
        .iter()
        .filter_map(|ing| {
            ing.metadata
                .annotations
                .as_ref()?
                .get(AUTH_SECRET_ANNOTATION)
                .cloned()
        })
        .collect()
}
