//! Task signatures — the duplicate-detection key.
//!
//! A signature is the SHA-256 hex digest of the task text after trimming
//! and case-folding, so whitespace and capitalization drift between the
//! extractor's output and what a board displays never produces duplicates.
//! Punctuation is NOT normalized: "…page by Friday" and "…page by Friday!"
//! are distinct tasks by design.

use std::fmt;

use sha2::{Digest, Sha256};

/// Normalized duplicate-detection key for one task text.
///
/// Computation is pure and deterministic: the same text always yields the
/// same signature, in any session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Signature of `text`: trim → lowercase → SHA-256 → hex.
    pub fn of(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Update landing page by Friday", "  update landing page by friday  ")]
    #[case("SHIP IT", "ship it")]
    #[case("tabs\tand spaces", "\ttabs\tand spaces ")]
    fn whitespace_and_case_drift_collapse(#[case] a: &str, #[case] b: &str) {
        assert_eq!(Signature::of(a), Signature::of(b));
    }

    #[test]
    fn punctuation_stays_significant() {
        assert_ne!(
            Signature::of("Update landing page by Friday"),
            Signature::of("Update landing page by Friday!")
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let text = "Prepare the onboarding mockups";
        assert_eq!(Signature::of(text), Signature::of(text));
    }

    #[test]
    fn hex_digest_is_sha256_sized() {
        assert_eq!(Signature::of("anything").as_hex().len(), 64);
    }
}
