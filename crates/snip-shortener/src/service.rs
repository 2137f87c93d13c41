use async_trait::async_trait;
use snip_core::{
    Clock, InsertOutcome, Repository, ShortCode, ShortenedUrl, Shortener, ShortenerError,
    SystemClock,
};
use snip_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Settings for [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// Public base URL that short URLs are composed against.
    #[builder(setter(into))]
    pub base_url: String,
    /// How many candidate codes to try before giving up.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL validation
/// - Short code generation with bounded retry on collision
/// - Short URL composition
///
/// Uniqueness is decided by the repository's conditional insert, never by a
/// separate existence check, so concurrent callers cannot both claim a code.
#[derive(Debug)]
pub struct ShortenerService<R, G, C = SystemClock> {
    repository: Arc<R>,
    generator: G,
    clock: C,
    settings: ShortenerSettings,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` stamping links with the system clock.
    pub fn new(
        repository: Arc<R>,
        generator: G,
        settings: ShortenerSettings,
    ) -> Result<Self, ShortenerError> {
        Self::with_clock(repository, generator, SystemClock, settings)
    }
}

impl<R: Repository, G: Generator, C: Clock> ShortenerService<R, G, C> {
    /// Creates a new `ShortenerService` with a custom clock.
    pub fn with_clock(
        repository: Arc<R>,
        generator: G,
        clock: C,
        settings: ShortenerSettings,
    ) -> Result<Self, ShortenerError> {
        if settings.max_attempts == 0 {
            return Err(ShortenerError::InvalidSettings(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            repository,
            generator,
            clock,
            settings,
        })
    }

    /// Trims the input and checks for an `http://` or `https://` prefix.
    ///
    /// Nothing beyond the prefix is checked; unreachable or odd-looking URLs
    /// are accepted as long as the scheme matches exactly.
    fn validate_url(raw_url: &str) -> Result<&str, ShortenerError> {
        let url = raw_url.trim();

        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        if !ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            )));
        }

        Ok(url)
    }
}

#[async_trait]
impl<R: Repository, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    async fn shorten(&self, raw_url: &str) -> Result<ShortenedUrl, ShortenerError> {
        let url = Self::validate_url(raw_url)?;
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate: ShortCode = self.generator.generate().into();

            match self
                .repository
                .insert_if_absent(&candidate, url, self.clock.now())
                .await?
            {
                InsertOutcome::Inserted => {
                    let short_url = candidate.to_url(&self.settings.base_url);
                    info!(code = %candidate, url = %url, attempt, "shortened url");
                    return Ok(ShortenedUrl {
                        code: candidate,
                        short_url,
                    });
                }
                InsertOutcome::AlreadyExists => {
                    debug!(code = %candidate, attempt, "short code collision, retrying");
                }
            }
        }

        error!(
            attempts = max_attempts,
            "failed to generate unique code after max attempts"
        );
        Err(ShortenerError::Exhausted {
            attempts: max_attempts,
        })
    }
}
