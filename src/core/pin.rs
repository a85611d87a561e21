use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a PIN. The plaintext PIN is never persisted.
pub fn hash_pin(pin: &str) -> String {
    hex::encode(Sha256::digest(pin.as_bytes()))
}

/// Compares the digest of `pin` against a stored hash.
pub fn verify_pin(pin: &str, pin_hash: &str) -> bool {
    hash_pin(pin).eq_ignore_ascii_case(pin_hash)
}
