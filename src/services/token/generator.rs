//! Uniform random strings over an arbitrary alphabet.
use super::entropy::{EntropySource, OsEntropy};
use super::error::TokenError;

/// Replaceable token generation strategy.
///
/// Receives an already validated length and a non-empty alphabet. Closures with
/// the same shape implement it too, so tests and callers can swap the algorithm
/// without a dedicated type.
pub trait TokenStrategy: Send + Sync {
    fn generate(&self, length: usize, alphabet: &[char]) -> Result<String, TokenError>;
}

impl<F> TokenStrategy for F
where
    F: Fn(usize, &[char]) -> Result<String, TokenError> + Send + Sync,
{
    fn generate(&self, length: usize, alphabet: &[char]) -> Result<String, TokenError> {
        self(length, alphabet)
    }
}

/// Default strategy: one rejection-sampled draw per output position.
#[derive(Debug, Clone, Default)]
pub struct SecureRandom<S = OsEntropy> {
    source: S,
}

impl<S: EntropySource> SecureRandom<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: EntropySource> TokenStrategy for SecureRandom<S> {
    fn generate(&self, length: usize, alphabet: &[char]) -> Result<String, TokenError> {
        random_string(length, alphabet, &self.source)
    }
}

/// Build a string of `length` characters, each picked uniformly from `alphabet`.
pub fn random_string(
    length: usize,
    alphabet: &[char],
    source: &dyn EntropySource,
) -> Result<String, TokenError> {
    if alphabet.is_empty() {
        return Err(TokenError::EmptyAlphabet);
    }

    let mut out = String::with_capacity(length);
    for _ in 0..length {
        let idx = uniform_index(alphabet.len(), source)?;
        out.push(alphabet[idx]);
    }
    Ok(out)
}

/// Draw an index in `[0, bound)` with exactly equal probability for every value.
///
/// Words below `2^32 mod bound` are rejected and redrawn, which leaves a range
/// whose size is a multiple of `bound` before the final reduction.
pub fn uniform_index(bound: usize, source: &dyn EntropySource) -> Result<usize, TokenError> {
    if bound == 0 {
        return Err(TokenError::EmptyAlphabet);
    }
    let bound = u32::try_from(bound).map_err(|_| TokenError::AlphabetTooLarge {
        max: u64::from(u32::MAX),
    })?;

    let threshold = bound.wrapping_neg() % bound;
    loop {
        let word = source.next_u32()?;
        if word >= threshold {
            return Ok((word % bound) as usize);
        }
    }
}
