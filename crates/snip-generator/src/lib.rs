pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use snip_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is enforced by the repository, so a generator only has to
/// produce well-formed candidates; collisions are retried by the caller.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate that can be converted into a short code.
    fn generate(&self) -> Self::Output;
}
