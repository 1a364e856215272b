//! Entropy sources for token generation.
//!
//! The generator only ever asks for 32-bit words. `OsEntropy` reads them from
//! the operating system CSPRNG via `getrandom`; there is no fallback to a
//! non-cryptographic generator when it fails.
use thiserror::Error;

/// The entropy source could not produce random bytes.
#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("entropy source unavailable")]
    Os(#[from] getrandom::Error),

    /// Failure reported by a non-OS source.
    #[error("entropy source unavailable: {0}")]
    Custom(String),
}

/// A cryptographically secure source of uniformly distributed `u32` words.
pub trait EntropySource: Send + Sync {
    fn next_u32(&self) -> Result<u32, EntropyError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_u32(&self) -> Result<u32, EntropyError> {
        let mut bytes = [0u8; 4];
        getrandom::fill(&mut bytes)?;
        Ok(u32::from_ne_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::services::token::TokenError;

    #[test]
    fn os_error_survives_the_chain() {
        let err = TokenError::from(EntropyError::from(getrandom::Error::UNSUPPORTED));

        let entropy = err.source().unwrap();
        assert_eq!(entropy.to_string(), "entropy source unavailable");

        let os = entropy.source().unwrap();
        assert!(os.downcast_ref::<getrandom::Error>().is_some());
    }

    #[test]
    fn os_entropy_produces_words() {
        let a = OsEntropy.next_u32().unwrap();
        let b = OsEntropy.next_u32().unwrap();
        let c = OsEntropy.next_u32().unwrap();
        assert!(a != b || b != c);
    }
}
