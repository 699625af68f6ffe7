//! Short code generation.
//!
//! Codes are drawn uniformly from the 62-symbol alphanumeric alphabet
//! (`A-Z`, `a-z`, `0-9`), so they are URL-safe without escaping. Generation
//! gives no uniqueness guarantee; callers check the store and retry.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default number of characters in a generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Number of distinct symbols a code character is drawn from.
pub const ALPHABET_SIZE: usize = 62;

/// Generates a random alphanumeric code of `length` characters using the
/// thread-local RNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::rng(), length)
}

/// Generates a code from the given random source.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_default_length() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_generate_code_respects_length() {
        for length in [1, 4, 6, 12, 32] {
            assert_eq!(generate_code(length).chars().count(), length);
        }
    }

    #[test]
    fn test_generate_code_zero_length_is_empty() {
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..500 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_covers_whole_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<char> = generate_code_with(&mut rng, 20_000).chars().collect();

        assert_eq!(seen.len(), ALPHABET_SIZE);
    }

    #[test]
    fn test_generate_code_with_seed_is_deterministic() {
        let a = generate_code_with(&mut StdRng::seed_from_u64(7), 10);
        let b = generate_code_with(&mut StdRng::seed_from_u64(7), 10);

        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_code_rarely_repeats() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate_code(DEFAULT_CODE_LENGTH))
            .collect();

        // 62^6 possibilities; a handful of collisions in 1000 draws would be abnormal.
        assert!(codes.len() >= 998);
    }
}
