//! Token cost estimation.
//!
//! A length-based approximation: one token per `chars_per_token` characters,
//! rounded up. It does not track any real tokenizer, but it is deterministic
//! and monotonic in text length, so savings ratios are reproducible.

/// Characters per token used when nothing else is configured.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEstimator {
    chars_per_token: usize,
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN)
    }
}

impl TokenEstimator {
    /// A ratio of zero is treated as one.
    #[must_use]
    pub const fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: if chars_per_token == 0 { 1 } else { chars_per_token },
        }
    }

    #[must_use]
    pub const fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }

    #[must_use]
    pub fn estimate(&self, text: &str) -> u64 {
        self.estimate_chars(text.chars().count())
    }

    /// Estimate from a character count already known to the caller.
    #[must_use]
    pub const fn estimate_chars(&self, chars: usize) -> u64 {
        chars.div_ceil(self.chars_per_token) as u64
    }
}
