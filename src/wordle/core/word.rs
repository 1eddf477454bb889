use std::{ops::Index, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::{
    guess::{GuessResult, LetterState},
    WORD_LENGTH,
};

/// A normalized (lowercase) word of exactly [`WORD_LENGTH`] letters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    letters: Vec<char>,
}

impl Word {
    pub fn iter(&self) -> std::slice::Iter<'_, char> {
        self.letters.iter()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Marks each letter of `guess` against this word.
    ///
    /// A letter is [`LetterState::Correct`] when it sits in the same position,
    /// [`LetterState::WrongPlace`] when it appears anywhere else in the word and
    /// [`LetterState::NotPresent`] otherwise. Letter counts are not consumed, so a
    /// repeated guess letter can be marked as present more than once.
    pub fn compare(&self, guess: &str) -> GuessResult {
        let guess = lowercase(guess);

        let matches = guess
            .chars()
            .enumerate()
            .map(|(index, letter)| {
                if self.letters.get(index) == Some(&letter) {
                    LetterState::Correct
                } else if self.contains(letter) {
                    trace!("{}: wrong place", letter);
                    LetterState::WrongPlace
                } else {
                    LetterState::NotPresent
                }
            })
            .collect();

        GuessResult::new(guess, matches)
    }
}

/// Lowercases `s` one char at a time, so the result has as many chars as `s`.
///
/// Chars whose lowercase form is more than one char (like `İ`) are kept as they are.
pub fn lowercase(s: &str) -> String {
    s.chars().map(lowercase_char).collect()
}

fn lowercase_char(letter: char) -> char {
    let mut lower = letter.to_lowercase();

    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => letter,
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("word `{0}` must have {} letters but has {}", WORD_LENGTH, .0.chars().count())]
pub struct ParseWordError(String);

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters = s.chars().map(lowercase_char).collect::<Vec<char>>();

        if letters.len() != WORD_LENGTH {
            return Err(ParseWordError(s.to_owned()));
        }

        Ok(Self { letters })
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters.iter().collect::<String>())
    }
}

impl Index<usize> for Word {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}
