//! Domain Services
//!
//! Secret generation and guess scoring. Both are traits so the use cases can
//! run against deterministic implementations in tests.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::value_objects::{DIGIT_COUNT, Guess, SecretNumber};

/// Produces secrets for new games
pub trait SecretGenerator: Send + Sync {
    fn generate(&self) -> SecretNumber;
}

/// Scores a non-winning guess against the secret
pub trait GuessEvaluator: Send + Sync {
    /// Human-readable feedback. Must not reveal the secret.
    fn evaluate(&self, secret: &SecretNumber, guess: &Guess) -> String;
}

// ============================================================================
// Secret generation
// ============================================================================

/// Draw a secret uniformly from all 5040 four-digit permutations
///
/// A partial Fisher-Yates shuffle of the ten digits; every ordered choice
/// of four distinct digits is equally likely.
pub fn random_secret<R: Rng + ?Sized>(rng: &mut R) -> SecretNumber {
    let mut digits: [u8; 10] = *b"0123456789";
    let (chosen, _) = digits.partial_shuffle(rng, DIGIT_COUNT);
    // partial_shuffle never repeats an element
    SecretNumber::from_distinct_digits(chosen)
}

/// Production generator backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecretGenerator;

impl SecretGenerator for RandomSecretGenerator {
    fn generate(&self) -> SecretNumber {
        random_secret(&mut rand::rng())
    }
}

// ============================================================================
// Guess scoring
// ============================================================================

/// Positional comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Right digit, right position
    pub bulls: u8,
    /// Right digit, wrong position
    pub cows: u8,
}

/// Count bulls and cows between a secret and a guess
pub fn score(secret: &SecretNumber, guess: &Guess) -> Score {
    let secret = secret.expose().as_bytes();
    let guess = guess.as_str().as_bytes();

    let mut bulls = 0u8;
    let mut cows = 0u8;
    for (i, &g) in guess.iter().enumerate() {
        if secret[i] == g {
            bulls += 1;
        } else if secret.contains(&g) {
            cows += 1;
        }
    }
    Score { bulls, cows }
}

/// Default evaluator: "bulls and cows" feedback
#[derive(Debug, Clone, Copy, Default)]
pub struct BullsAndCowsEvaluator;

impl GuessEvaluator for BullsAndCowsEvaluator {
    fn evaluate(&self, secret: &SecretNumber, guess: &Guess) -> String {
        let Score { bulls, cows } = score(secret, guess);
        if bulls == 0 && cows == 0 {
            return "No matching digits".to_string();
        }
        format!(
            "{} {}, {} {}",
            bulls,
            plural(bulls, "bull"),
            cows,
            plural(cows, "cow")
        )
    }
}

fn plural(count: u8, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn secret(s: &str) -> SecretNumber {
        SecretNumber::new(s).unwrap()
    }

    fn guess(s: &str) -> Guess {
        Guess::parse(s).unwrap()
    }

    #[test]
    fn test_generated_secrets_have_distinct_digits() {
        let generator = RandomSecretGenerator;
        for _ in 0..500 {
            let value = generator.generate();
            let raw = value.expose();
            assert_eq!(raw.len(), 4);
            assert!(raw.bytes().all(|b| b.is_ascii_digit()));
            let unique: HashSet<u8> = raw.bytes().collect();
            assert_eq!(unique.len(), 4, "repeated digit in {raw}");
        }
    }

    #[test]
    fn test_seeded_secrets_pass_validation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let secret = random_secret(&mut rng);
            assert_eq!(SecretNumber::new(secret.expose()), Ok(secret));
        }
    }

    #[test]
    fn test_generated_secrets_are_not_constant() {
        let generator = RandomSecretGenerator;
        let seen: HashSet<String> = (0..200)
            .map(|_| generator.generate().expose().to_string())
            .collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_every_digit_reaches_every_position() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut seen = [[false; 10]; 4];
        for _ in 0..5_000 {
            let value = random_secret(&mut rng);
            for (pos, d) in value.expose().bytes().enumerate() {
                seen[pos][usize::from(d - b'0')] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = random_secret(&mut StdRng::seed_from_u64(42));
        let b = random_secret(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_score() {
        assert_eq!(
            score(&secret("1234"), &guess("5678")),
            Score { bulls: 0, cows: 0 }
        );
        assert_eq!(
            score(&secret("1234"), &guess("1243")),
            Score { bulls: 2, cows: 2 }
        );
        assert_eq!(
            score(&secret("1234"), &guess("4321")),
            Score { bulls: 0, cows: 4 }
        );
        assert_eq!(
            score(&secret("1234"), &guess("1256")),
            Score { bulls: 2, cows: 0 }
        );
    }

    #[test]
    fn test_evaluator_messages() {
        let evaluator = BullsAndCowsEvaluator;
        assert_eq!(
            evaluator.evaluate(&secret("1234"), &guess("5678")),
            "No matching digits"
        );
        assert_eq!(
            evaluator.evaluate(&secret("1234"), &guess("1567")),
            "1 bull, 0 cows"
        );
        assert_eq!(
            evaluator.evaluate(&secret("1234"), &guess("1243")),
            "2 bulls, 2 cows"
        );
    }

    #[test]
    fn test_evaluator_does_not_echo_secret() {
        let evaluator = BullsAndCowsEvaluator;
        let message = evaluator.evaluate(&secret("9051"), &guess("1509"));
        assert!(!message.contains("9051"));
    }
}
