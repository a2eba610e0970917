//! # Secret Transform
//!
//! Pure sealing logic for basic-auth secrets.
//!
//! A secret is "sealed" once its plaintext `username`/`password` fields have
//! been replaced by a single derived `auth` field holding the conventional
//! `username:hash` line. This module only decides and derives; it performs no
//! I/O and never mutates its input. The caller persists `Sealed` results.

use std::collections::BTreeMap;

use k8s_openapi::ByteString;

use crate::constants::{AUTH_KEY, PASSWORD_KEY, USERNAME_KEY};
use crate::hash::{hash_password, HashError};

/// Result of evaluating one secret's data map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do; the reason says why
    Unchanged(SkipReason),
    /// New data map with `auth` set and the plaintext fields removed
    Sealed(BTreeMap<String, ByteString>),
}

/// Why a secret was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `auth` already present; reprocessing is a no-op
    AlreadySealed,
    /// `username` not yet provided
    MissingUsername,
    /// `password` not yet provided
    MissingPassword,
}

/// Seal a secret's data map if it is ready.
///
/// Evaluated in order: an existing `auth` field wins (idempotence guard), a
/// missing `username` or `password` means the secret is not ready yet (not an
/// error), otherwise the password is hashed and the `auth` line is assembled
/// at the byte level. Usernames need not be valid UTF-8, and colons in either
/// field pass through verbatim; consumers split on the first colon and bcrypt
/// digests never start with one.
///
/// A hash failure propagates without touching the input.
pub fn seal(data: &BTreeMap<String, ByteString>) -> Result<Outcome, HashError> {
    if data.contains_key(AUTH_KEY) {
        return Ok(Outcome::Unchanged(SkipReason::AlreadySealed));
    }
    let username = match data.get(USERNAME_KEY) {
        Some(u) => u,
        None => return Ok(Outcome::Unchanged(SkipReason::MissingUsername)),
    };
    let password = match data.get(PASSWORD_KEY) {
        Some(p) => p,
        None => return Ok(Outcome::Unchanged(SkipReason::MissingPassword)),
    };

    let digest = hash_password(&password.0)?;

    let mut auth = username.0.clone();
    auth.push(b':');
    auth.extend_from_slice(digest.as_bytes());

    let mut sealed = data.clone();
    sealed.remove(USERNAME_KEY);
    sealed.remove(PASSWORD_KEY);
    sealed.insert(AUTH_KEY.to_string(), ByteString(auth));
    Ok(Outcome::Sealed(sealed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(entries: &[(&str, &[u8])]) -> BTreeMap<String, ByteString> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), ByteString(v.to_vec())))
            .collect()
    }

    #[test]
    fn seals_a_ready_secret() {
        let input = data(&[(USERNAME_KEY, b"alice"), (PASSWORD_KEY, b"secret")]);
        let sealed = match seal(&input).expect("seal should succeed") {
            Outcome::Sealed(map) => map,
            other => panic!("expected Sealed, got {other:?}"),
        };

        assert!(!sealed.contains_key(USERNAME_KEY));
        assert!(!sealed.contains_key(PASSWORD_KEY));

        let auth = String::from_utf8(sealed[AUTH_KEY].0.clone()).expect("auth is utf-8 here");
        let (user, digest) = auth.split_once(':').expect("auth has a colon");
        assert_eq!(user, "alice");
        assert!(bcrypt::verify(b"secret", digest).expect("verify should run"));
    }

    #[test]
    fn already_sealed_secret_is_a_noop() {
        let input = data(&[(AUTH_KEY, b"existing")]);
        assert_eq!(
            seal(&input).expect("seal should succeed"),
            Outcome::Unchanged(SkipReason::AlreadySealed)
        );
    }

    #[test]
    fn auth_wins_even_when_plaintext_fields_are_present() {
        let input = data(&[
            (AUTH_KEY, b"existing"),
            (USERNAME_KEY, b"alice"),
            (PASSWORD_KEY, b"secret"),
        ]);
        assert_eq!(
            seal(&input).expect("seal should succeed"),
            Outcome::Unchanged(SkipReason::AlreadySealed)
        );
    }

    #[test]
    fn missing_username_is_not_ready() {
        let input = data(&[(PASSWORD_KEY, b"secret")]);
        assert_eq!(
            seal(&input).expect("seal should succeed"),
            Outcome::Unchanged(SkipReason::MissingUsername)
        );
    }

    #[test]
    fn missing_password_is_not_ready() {
        let input = data(&[(USERNAME_KEY, b"alice")]);
        assert_eq!(
            seal(&input).expect("seal should succeed"),
            Outcome::Unchanged(SkipReason::MissingPassword)
        );
    }

    #[test]
    fn empty_data_is_not_ready() {
        let input = BTreeMap::new();
        assert_eq!(
            seal(&input).expect("seal should succeed"),
            Outcome::Unchanged(SkipReason::MissingUsername)
        );
    }

    #[test]
    fn sealing_twice_is_idempotent() {
        let input = data(&[(USERNAME_KEY, b"alice"), (PASSWORD_KEY, b"secret")]);
        let sealed = match seal(&input).expect("first seal should succeed") {
            Outcome::Sealed(map) => map,
            other => panic!("expected Sealed, got {other:?}"),
        };
        assert_eq!(
            seal(&sealed).expect("second seal should succeed"),
            Outcome::Unchanged(SkipReason::AlreadySealed)
        );
    }

    #[test]
    fn colons_in_username_pass_through_verbatim() {
        let input = data(&[(USERNAME_KEY, b"a:b"), (PASSWORD_KEY, b"secret")]);
        let sealed = match seal(&input).expect("seal should succeed") {
            Outcome::Sealed(map) => map,
            other => panic!("expected Sealed, got {other:?}"),
        };
        let auth = sealed[AUTH_KEY].0.clone();
        assert!(auth.starts_with(b"a:b:"), "no escaping is applied");
    }

    #[test]
    fn unrelated_fields_survive_sealing() {
        let input = data(&[
            (USERNAME_KEY, b"alice"),
            (PASSWORD_KEY, b"secret"),
            ("note", b"keep me"),
        ]);
        let sealed = match seal(&input).expect("seal should succeed") {
            Outcome::Sealed(map) => map,
            other => panic!("expected Sealed, got {other:?}"),
        };
        assert_eq!(sealed["note"], ByteString(b"keep me".to_vec()));
    }

    #[test]
    fn input_map_is_never_mutated() {
        let input = data(&[(USERNAME_KEY, b"alice"), (PASSWORD_KEY, b"secret")]);
        let snapshot = input.clone();
        let _ = seal(&input).expect("seal should succeed");
        assert_eq!(input, snapshot);
    }
}
