//! Token generator tests.

use token_gate::services::token::{
    DEFAULT_ALPHABET, EntropyError, EntropySource, MAX_TOKEN_LENGTH, SecureRandom, TokenConfig,
    TokenError, generate_token, new_token,
};

fn config(length: usize, alphabet: &str) -> TokenConfig {
    TokenConfig::builder()
        .length(length)
        .alphabet(alphabet.chars())
        .build()
}

#[test]
fn valid_lengths_and_alphabets() {
    for (length, alphabet) in [(16, DEFAULT_ALPHABET), (16, "abc"), (1, "z"), (MAX_TOKEN_LENGTH, "01")] {
        let token = generate_token(&config(length, alphabet)).unwrap();
        assert_eq!(token.chars().count(), length);
        assert!(
            token.chars().all(|c| alphabet.contains(c)),
            "{token} has characters outside {alphabet}"
        );
    }
}

#[test]
fn multibyte_alphabet_counts_characters() {
    let token = generate_token(&config(12, "äöü€")).unwrap();
    assert_eq!(token.chars().count(), 12);
    assert!(token.chars().all(|c| "äöü€".contains(c)));
}

#[test]
fn zero_length_is_invalid() {
    assert!(matches!(new_token(0), Err(TokenError::InvalidLength)));
}

#[test]
fn length_above_maximum_is_rejected() {
    let err = generate_token(&config(100_000, "abcdef")).unwrap_err();
    assert!(matches!(
        err,
        TokenError::LengthTooLarge {
            max: MAX_TOKEN_LENGTH
        }
    ));
    assert!(new_token(MAX_TOKEN_LENGTH + 1).is_err());
    assert_eq!(new_token(MAX_TOKEN_LENGTH).unwrap().len(), MAX_TOKEN_LENGTH);
}

#[test]
fn empty_alphabet_is_rejected() {
    let err = generate_token(&config(16, "")).unwrap_err();
    assert!(matches!(err, TokenError::EmptyAlphabet));
}

#[test]
fn tokens_differ_between_calls() {
    let a = new_token(16).unwrap();
    let b = new_token(16).unwrap();
    assert_ne!(a, b);
}

#[test]
fn two_letter_alphabet_is_balanced_per_position() {
    const RUNS: usize = 2000;
    const LENGTH: usize = 16;

    let config = config(LENGTH, "ab");
    let mut a_counts = [0usize; LENGTH];
    for _ in 0..RUNS {
        let token = generate_token(&config).unwrap();
        for (i, c) in token.chars().enumerate() {
            if c == 'a' {
                a_counts[i] += 1;
            }
        }
    }

    // Binomial(2000, 0.5) has a standard deviation of ~22; 0.4..0.6 is ~9 sigma.
    for (i, count) in a_counts.iter().enumerate() {
        let freq = *count as f64 / RUNS as f64;
        assert!((0.4..0.6).contains(&freq), "position {i}: frequency {freq}");
    }
}

struct Unavailable;

impl EntropySource for Unavailable {
    fn next_u32(&self) -> Result<u32, EntropyError> {
        Err(EntropyError::Custom("device not ready".into()))
    }
}

#[test]
fn entropy_failure_is_a_hard_error() {
    let config = TokenConfig::builder()
        .length(8)
        .strategy(SecureRandom::new(Unavailable))
        .build();

    let err = generate_token(&config).unwrap_err();
    assert!(matches!(err, TokenError::RandomSource(_)));
    assert!(err.to_string().contains("device not ready"));
}

#[test]
fn concurrent_generation() {
    let config = TokenConfig::default();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = config.clone();
            std::thread::spawn(move || generate_token(&config).unwrap())
        })
        .collect();

    let mut tokens: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 8);
}
