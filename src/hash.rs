//! # Credential Hasher
//!
//! One-way password hashing for basic-auth lines.
//!
//! bcrypt at the default cost is the only supported scheme. The produced
//! string embeds the cost factor and salt, so verification later needs no
//! separately stored material. Two hashes of the same plaintext differ
//! (fresh salt per call) but both verify against it.

use thiserror::Error;

/// Failure from the underlying bcrypt primitive (unsupported cost,
/// over-long input). Callers skip the affected item.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt rejected the password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password into a self-describing bcrypt string.
///
/// No length or character-set validation happens here; any rejection comes
/// from the primitive itself.
pub fn hash_password(plaintext: &[u8]) -> Result<String, HashError> {
    Ok(bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_verifies_against_its_plaintext() {
        let digest = hash_password(b"hunter2").expect("hash should succeed");
        assert!(bcrypt::verify(b"hunter2", &digest).expect("verify should run"));
    }

    #[test]
    fn digest_rejects_a_different_plaintext() {
        let digest = hash_password(b"hunter2").expect("hash should succeed");
        assert!(!bcrypt::verify(b"hunter3", &digest).expect("verify should run"));
    }

    #[test]
    fn repeated_hashing_salts_differently_but_both_verify() {
        let first = hash_password(b"same-input").expect("hash should succeed");
        let second = hash_password(b"same-input").expect("hash should succeed");
        assert_ne!(first, second, "salt randomization must vary the digest");
        assert!(bcrypt::verify(b"same-input", &first).expect("verify should run"));
        assert!(bcrypt::verify(b"same-input", &second).expect("verify should run"));
    }
}
