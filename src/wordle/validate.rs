use super::{core::WORD_LENGTH, WordsList};

/// Decides whether a guess may be played at all.
pub trait GuessValidator {
    fn is_valid_word(&self, guess: &str) -> bool;
}

/// Accepts anything with exactly [`WORD_LENGTH`] characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthCheck;

impl LengthCheck {
    pub fn has_length(guess: &str) -> bool {
        guess.chars().count() == WORD_LENGTH
    }
}

impl GuessValidator for LengthCheck {
    fn is_valid_word(&self, guess: &str) -> bool {
        Self::has_length(guess)
    }
}

impl GuessValidator for WordsList {
    fn is_valid_word(&self, guess: &str) -> bool {
        LengthCheck::has_length(guess) && self.contains(guess)
    }
}

/// Validation picked at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Validation {
    Length(LengthCheck),
    List(WordsList),
}

impl Default for Validation {
    fn default() -> Self {
        Self::Length(LengthCheck)
    }
}

impl GuessValidator for Validation {
    fn is_valid_word(&self, guess: &str) -> bool {
        match self {
            Self::Length(check) => check.is_valid_word(guess),
            Self::List(list) => list.is_valid_word(guess),
        }
    }
}

impl<T: GuessValidator + ?Sized> GuessValidator for &T {
    fn is_valid_word(&self, guess: &str) -> bool {
        (**self).is_valid_word(guess)
    }
}
