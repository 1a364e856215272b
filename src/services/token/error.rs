use thiserror::Error;

use super::entropy::EntropyError;

/// Errors returned while minting a token.
///
/// All of them halt minting; no partial token is ever returned alongside one.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("a non-zero length is required for the token")]
    InvalidLength,

    #[error("the maximum token length is limited to {max} characters")]
    LengthTooLarge { max: usize },

    #[error("alphabet is empty")]
    EmptyAlphabet,

    #[error("alphabet is limited to {max} characters")]
    AlphabetTooLarge { max: u64 },

    #[error("strategy returned a token that is not {length} characters from the alphabet")]
    StrategyContract { length: usize },

    #[error("generate uniform random value: {0}")]
    RandomSource(#[from] EntropyError),
}
