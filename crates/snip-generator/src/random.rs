use crate::error::GeneratorError;
use crate::Generator;
use rand::Rng;
use snip_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use snip_core::ShortCode;

/// The 62 URL-safe characters codes are drawn from.
pub const ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates fixed-length codes uniformly at random from [`ALPHABET`].
///
/// Characters come from the thread-local CSPRNG (`rand::rng()`), which is
/// seeded from the operating system, so issued codes cannot be predicted
/// from previously observed ones.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// The length must lie within the bounds [`ShortCode::new`] accepts,
    /// otherwise issued codes could never be looked up again.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength(length));
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_62_unique_alphanumerics() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn zero_length_is_rejected() {
        assert_eq!(
            RandomGenerator::new(0).unwrap_err(),
            GeneratorError::InvalidLength(0)
        );
    }

    #[test]
    fn length_beyond_short_code_limit_is_rejected() {
        assert_eq!(
            RandomGenerator::new(65).unwrap_err(),
            GeneratorError::InvalidLength(65)
        );
        assert!(RandomGenerator::new(MAX_LENGTH).is_ok());
    }

    #[test]
    fn default_length_is_six() {
        let code = RandomGenerator::default().generate();
        assert_eq!(code.as_str().len(), 6);
    }

    #[test]
    fn codes_have_configured_length_and_alphabet() {
        for length in [1, 6, 12, 32] {
            let generator = RandomGenerator::new(length).unwrap();
            for _ in 0..200 {
                let code = generator.generate();
                assert_eq!(code.as_str().len(), length);
                assert!(code.as_str().bytes().all(|c| ALPHABET.contains(&c)));
                // Generated codes always pass public validation.
                assert!(ShortCode::new(code.as_str()).is_ok());
            }
        }
    }

    #[test]
    fn codes_are_not_repeated_in_practice() {
        let generator = RandomGenerator::new(12).unwrap();
        let codes: HashSet<_> = (0..1_000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 1_000);
    }

    #[test]
    fn every_character_class_shows_up() {
        let generator = RandomGenerator::new(64).unwrap();
        let sample: String = (0..50)
            .map(|_| generator.generate().to_string())
            .collect();

        assert!(sample.bytes().any(|c| c.is_ascii_uppercase()));
        assert!(sample.bytes().any(|c| c.is_ascii_lowercase()));
        assert!(sample.bytes().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
