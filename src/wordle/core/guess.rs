use std::{borrow::Cow, convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

use super::AsEmoji;

/// Feedback for a single letter of a guess.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterState {
    #[default]
    #[serde(rename = "gray")]
    NotPresent,
    #[serde(rename = "yellow")]
    WrongPlace,
    #[serde(rename = "green")]
    Correct,
}

impl AsEmoji for LetterState {
    fn as_emoji(&self) -> Cow<str> {
        match self {
            Self::Correct => "🟩",    // green square
            Self::WrongPlace => "🟨", // yellow square
            Self::NotPresent => "⬛", // black square
        }
        .into()
    }
}

impl FromStr for LetterState {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "O" => Self::Correct,
            "o" => Self::WrongPlace,
            "." => Self::NotPresent,
            _ => Self::default(),
        })
    }
}

impl std::fmt::Display for LetterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Correct => "O",
            Self::WrongPlace => "o",
            Self::NotPresent => ".",
        };

        f.write_str(symbol)
    }
}

/// The outcome of comparing one guess against the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    guess: String,
    matches: Vec<LetterState>,
    is_match: bool,
}

impl GuessResult {
    pub(super) fn new(guess: String, matches: Vec<LetterState>) -> Self {
        let is_match = matches.iter().all(|state| *state == LetterState::Correct);

        Self {
            guess,
            matches,
            is_match,
        }
    }

    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn matches(&self) -> &[LetterState] {
        &self.matches
    }

    pub fn is_match(&self) -> bool {
        self.is_match
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterState)> + '_ {
        self.guess.chars().zip(self.matches.iter().copied())
    }

    /// The marks in compact `O`/`o`/`.` notation.
    pub fn pattern(&self) -> String {
        self.matches.iter().map(ToString::to_string).collect()
    }
}

impl AsEmoji for GuessResult {
    fn as_emoji(&self) -> Cow<str> {
        self.matches.as_emoji().into_owned().into()
    }

    fn emoji_with_letters(&self) -> String {
        let (letters, states) = self.iter().fold(
            (String::new(), String::new()),
            |(letters, states), (letter, state)| {
                (
                    letters + "\u{200c}" /* zero-width non-joiner */ + &letter.as_emoji(),
                    states + &state.as_emoji(),
                )
            },
        );

        letters + "\n" + &states
    }

    fn emoji_with_letters_spaced(&self) -> String {
        let (letters, states) = self.iter().fold(
            (String::new(), String::new()),
            |(letters, states), (letter, state)| {
                (
                    letters + " " + &letter.as_emoji(),
                    states + " " + &state.as_emoji(),
                )
            },
        );

        letters.trim().to_owned() + "\n" + states.trim()
    }
}

impl PartialEq<&str> for GuessResult {
    fn eq(&self, other: &&str) -> bool {
        &self.pattern() == other
    }
}
