use anyhow::{Context, Result};
use clap::Parser;
use token_gate::services::token::{
    DEFAULT_ALPHABET, DEFAULT_TOKEN_LENGTH, TokenConfig, TokenError, generate_token,
};

/// Mint random bearer tokens for the token gate.
///
/// - Every character is drawn with a rejection-sampled index from the OS CSPRNG
/// - Prints one token per line
/// - Fails (non-zero exit, nothing printed for the failing token) on an invalid
///   length, an empty alphabet or an unavailable entropy source
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Token length in characters (1..=1000)
    #[arg(long, default_value_t = DEFAULT_TOKEN_LENGTH as i64, allow_negative_numbers = true)]
    length: i64,

    /// Characters to draw from. Duplicates raise a character's probability.
    #[arg(long, default_value = DEFAULT_ALPHABET)]
    alphabet: String,

    /// Number of tokens to print
    #[arg(long, default_value_t = 1)]
    count: usize,
}

fn token_config(args: &Args) -> Result<TokenConfig, TokenError> {
    let length = usize::try_from(args.length).map_err(|_| TokenError::InvalidLength)?;
    Ok(TokenConfig::builder()
        .length(length)
        .alphabet(args.alphabet.chars())
        .build())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = token_config(&args).context("invalid token settings")?;

    for _ in 0..args.count {
        let token = generate_token(&config).context("generate token")?;
        println!("{token}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["token-gen"]).unwrap();
        let config = token_config(&args).unwrap();
        assert_eq!(config.length(), DEFAULT_TOKEN_LENGTH);
        assert_eq!(args.count, 1);
    }

    #[test]
    fn negative_length_is_invalid() {
        let args = Args::try_parse_from(["token-gen", "--length", "-1"]).unwrap();
        assert!(matches!(token_config(&args), Err(TokenError::InvalidLength)));
    }

    #[test]
    fn custom_alphabet_is_honoured() {
        let args =
            Args::try_parse_from(["token-gen", "--length", "32", "--alphabet", "01"]).unwrap();
        let token = generate_token(&token_config(&args).unwrap()).unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn empty_alphabet_fails_generation() {
        let args = Args::try_parse_from(["token-gen", "--alphabet", ""]).unwrap();
        let err = generate_token(&token_config(&args).unwrap()).unwrap_err();
        assert!(matches!(err, TokenError::EmptyAlphabet));
    }
}
