//! One-way hashing of opaque tokens into store lookup keys.
//!
//! Not for passwords: SHA-256 is fast on purpose so the digest can be
//! recomputed on every lookup.

use sha2::{Digest, Sha256};

/// Hex encoded SHA-256 digest of `raw`
pub fn hash_secret(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

/// Leading characters of a digest, safe to put in logs
pub(crate) fn digest_hint(digest: &str) -> &str {
    digest.get(..8).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_secret("token"), hash_secret("token"));
        assert_ne!(hash_secret("token"), hash_secret("token2"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_secret("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_hint() {
        assert_eq!(digest_hint(&hash_secret("abc")), "ba7816bf");
        assert_eq!(digest_hint("abc"), "abc");
    }
}
