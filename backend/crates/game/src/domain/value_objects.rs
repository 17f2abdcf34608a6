//! Domain Value Objects
//!
//! Immutable, self-validating value types for the game domain.
//!
//! Constructors enforce request-shape rules only (lengths, ranges, digit
//! characters). Game rules such as "a guess must not repeat a digit" are
//! checked by the use cases so they surface as domain errors.

use std::fmt;
use thiserror::Error;

pub use kernel::id::{AttemptId, GameId, PlayerId};

/// Number of digits in a secret and in a guess
pub const DIGIT_COUNT: usize = 4;

/// Value object validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },

    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: u8, max: u8 },

    #[error("{field} must be a positive integer")]
    NonPositiveId { field: &'static str },

    #[error("number must be exactly 4 digits")]
    NotFourDigits,

    #[error("number must not repeat a digit")]
    RepeatedDigit,
}

// ============================================================================
// Player attributes
// ============================================================================

/// First or last name of a player
///
/// Surrounding whitespace is trimmed; the remainder must be 1-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    pub const MAX_CHARS: usize = 50;

    /// `field` names the input in error messages ("firstName", "lastName").
    pub fn new(value: impl AsRef<str>, field: &'static str) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName { field });
        }
        if trimmed.chars().count() > Self::MAX_CHARS {
            return Err(ValidationError::NameTooLong {
                field,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Player age in years (1-120)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 120;

    pub fn new(years: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&years) {
            Ok(Self(years as u8))
        } else {
            Err(ValidationError::AgeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn years(&self) -> u8 {
        self.0
    }
}

/// Validate a client-supplied identifier (must be >= 1)
pub fn positive_id<T>(value: i64, field: &'static str) -> Result<kernel::id::Id<T>, ValidationError> {
    if value >= 1 {
        Ok(kernel::id::Id::new(value))
    } else {
        Err(ValidationError::NonPositiveId { field })
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// A submitted guess: exactly four ASCII digits
///
/// Repeated digits are allowed here; see [`Guess::has_unique_digits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess(String);

impl Guess {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        if value.len() != DIGIT_COUNT || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotFourDigits);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if no digit appears twice
    pub fn has_unique_digits(&self) -> bool {
        all_distinct(self.0.as_bytes())
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The number a player has to guess
///
/// Four pairwise-distinct ASCII digits. `Debug` is redacted so the value
/// cannot end up in logs through `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretNumber(String);

impl SecretNumber {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        if value.len() != DIGIT_COUNT || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotFourDigits);
        }
        if !all_distinct(value.as_bytes()) {
            return Err(ValidationError::RepeatedDigit);
        }
        Ok(Self(value.to_string()))
    }

    /// Build a secret from ASCII digits already known to be pairwise distinct
    ///
    /// Only generators that draw without replacement may call this.
    pub(crate) fn from_distinct_digits(digits: &[u8]) -> Self {
        debug_assert!(
            digits.len() == DIGIT_COUNT
                && digits.iter().all(u8::is_ascii_digit)
                && all_distinct(digits)
        );
        Self(digits.iter().map(|&d| char::from(d)).collect())
    }

    /// Raw value, for persistence and scoring only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_matched_by(&self, guess: &Guess) -> bool {
        self.0 == guess.as_str()
    }
}

impl fmt::Debug for SecretNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretNumber(****)")
    }
}

fn all_distinct(digits: &[u8]) -> bool {
    let mut seen = [false; 10];
    for &d in digits {
        let slot = &mut seen[usize::from(d - b'0')];
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}

// ============================================================================
// GameStatus
// ============================================================================

/// Game lifecycle status
///
/// `Active -> Finished` is the only transition; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum GameStatus {
    #[default]
    Active = 0,
    Finished = 1,
}

impl GameStatus {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Finished),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
