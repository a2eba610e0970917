//! # Ingress Auth Controller
//!
//! A small Kubernetes controller that materializes basic-auth credentials for
//! ingresses.
//!
//! It polls the ingresses of one namespace for the
//! `ingress.kubernetes.io/auth-secret` annotation. Each referenced secret that
//! still holds plaintext `username`/`password` fields is "sealed": the
//! password is bcrypt-hashed, a combined `auth` field of the form
//! `username:hash` is written, and the plaintext fields are removed. Sealed
//! secrets are never touched again, so the cycle is idempotent and lost
//! updates heal on the next poll.
//!
//! Module layout:
//! - [`hash`] - bcrypt password hashing
//! - [`transform`] - pure sealing decision and derivation
//! - [`cluster`] - cluster API capability trait + kube implementation
//! - [`reconciler`] - the polling loop tying it together
//! - [`config`] - environment-derived startup configuration

pub mod cluster;
pub mod config;
pub mod constants;
pub mod hash;
pub mod reconciler;
pub mod transform;
