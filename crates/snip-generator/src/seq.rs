use crate::Generator;
use snip_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator using a sequential counter.
///
/// This generator produces codes like "sn000000", "sn000001", etc. It is
/// handy for tests and reproducible local runs where random codes get in
/// the way. Two instances with the same prefix and offset produce the same
/// sequence, which makes collisions easy to provoke on purpose.
///
/// The prefix must be alphanumeric for the codes to pass [`ShortCode::new`].
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
