use sha2::{Digest, Sha256};
use std::fmt;

/// The shared access code, held only as a SHA-256 digest.
#[derive(Clone)]
pub struct AccessCode {
    digest: [u8; 32],
}

impl AccessCode {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self { digest: digest(code) }
    }

    /// Compares a candidate in constant time with respect to its content.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        self.digest.iter().zip(candidate.iter()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }
}

impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(<redacted>)")
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
