//! Bearer token minting.
//!
//! Length policy is strict: a zero length or a length above
//! [`MAX_TOKEN_LENGTH`] is an error, never silently adjusted. An alphabet that
//! was never configured falls back to [`DEFAULT_ALPHABET`]; an alphabet that was
//! configured empty is an error.
//!
//! Duplicate characters in an alphabet are kept and raise their probability
//! accordingly.
use std::fmt;
use std::sync::Arc;

pub mod entropy;
pub mod error;
pub mod generator;

pub use entropy::{EntropyError, EntropySource, OsEntropy};
pub use error::TokenError;
pub use generator::{SecureRandom, TokenStrategy, random_string, uniform_index};

/// Upper bound for a token length.
pub const MAX_TOKEN_LENGTH: usize = 1000;

/// Length used when none is configured.
pub const DEFAULT_TOKEN_LENGTH: usize = 24;

/// Alphabet used when none is configured.
pub const DEFAULT_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// How tokens are minted. Immutable once built.
#[derive(Clone)]
pub struct TokenConfig {
    alphabet: Vec<char>,
    length: usize,
    strategy: Arc<dyn TokenStrategy>,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("alphabet_len", &self.alphabet.len())
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_TOKEN_LENGTH,
            strategy: Arc::new(SecureRandom::new(OsEntropy)),
        }
    }
}

impl TokenConfig {
    pub fn builder() -> TokenConfigBuilder {
        TokenConfigBuilder::default()
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

#[derive(Default)]
pub struct TokenConfigBuilder {
    alphabet: Option<Vec<char>>,
    length: Option<usize>,
    strategy: Option<Arc<dyn TokenStrategy>>,
}

impl TokenConfigBuilder {
    pub fn alphabet(mut self, alphabet: impl IntoIterator<Item = char>) -> Self {
        self.alphabet = Some(alphabet.into_iter().collect());
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn strategy(mut self, strategy: impl TokenStrategy + 'static) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Fill every unset field from [`TokenConfig::default`].
    pub fn build(self) -> TokenConfig {
        let defaults = TokenConfig::default();
        TokenConfig {
            alphabet: self.alphabet.unwrap_or(defaults.alphabet),
            length: self.length.unwrap_or(defaults.length),
            strategy: self.strategy.unwrap_or(defaults.strategy),
        }
    }
}

/// Mint a token according to `config`.
///
/// Whatever the strategy returns is checked: exactly `length` characters, each
/// drawn from the alphabet.
pub fn generate_token(config: &TokenConfig) -> Result<String, TokenError> {
    validate(config.length, &config.alphabet)?;
    let token = config.strategy.generate(config.length, &config.alphabet)?;
    if token.chars().count() != config.length
        || !token.chars().all(|c| config.alphabet.contains(&c))
    {
        return Err(TokenError::StrategyContract {
            length: config.length,
        });
    }
    Ok(token)
}

/// Mint a token of `length` characters over the default alphabet.
pub fn new_token(length: usize) -> Result<String, TokenError> {
    generate_token(&TokenConfig::builder().length(length).build())
}

fn validate(length: usize, alphabet: &[char]) -> Result<(), TokenError> {
    if length == 0 {
        return Err(TokenError::InvalidLength);
    }
    if length > MAX_TOKEN_LENGTH {
        return Err(TokenError::LengthTooLarge {
            max: MAX_TOKEN_LENGTH,
        });
    }
    if alphabet.is_empty() {
        return Err(TokenError::EmptyAlphabet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = TokenConfig::builder().build();
        assert_eq!(config.length(), DEFAULT_TOKEN_LENGTH);
        assert_eq!(config.alphabet().len(), DEFAULT_ALPHABET.len());
    }

    #[test]
    fn length_is_checked_before_strategy_runs() {
        let config = TokenConfig::builder()
            .length(0)
            .strategy(|_: usize, _: &[char]| -> Result<String, TokenError> {
                panic!("strategy must not run for an invalid length")
            })
            .build();
        assert!(matches!(
            generate_token(&config),
            Err(TokenError::InvalidLength)
        ));
    }

    #[test]
    fn custom_strategy_is_used() {
        let config = TokenConfig::builder()
            .length(3)
            .alphabet("q".chars())
            .strategy(|len: usize, alphabet: &[char]| -> Result<String, TokenError> {
                Ok(std::iter::repeat_n(alphabet[0], len).collect())
            })
            .build();
        assert_eq!(generate_token(&config).unwrap(), "qqq");
    }

    #[test]
    fn short_strategy_output_is_rejected() {
        let config = TokenConfig::builder()
            .length(24)
            .alphabet("ab".chars())
            .strategy(|_: usize, _: &[char]| -> Result<String, TokenError> {
                Ok("a".to_string())
            })
            .build();
        assert!(matches!(
            generate_token(&config),
            Err(TokenError::StrategyContract { length: 24 })
        ));
    }

    #[test]
    fn foreign_characters_from_strategy_are_rejected() {
        let config = TokenConfig::builder()
            .length(4)
            .alphabet("ab".chars())
            .strategy(|len: usize, _: &[char]| -> Result<String, TokenError> {
                Ok("x".repeat(len))
            })
            .build();
        assert!(matches!(
            generate_token(&config),
            Err(TokenError::StrategyContract { length: 4 })
        ));
    }

    #[test]
    fn debug_omits_strategy() {
        let rendered = format!("{:?}", TokenConfig::default());
        assert!(rendered.contains("length: 24"));
    }
}
