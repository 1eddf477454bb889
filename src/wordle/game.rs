use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::core::{AsEmoji, GuessResult, Word, MAX_GUESSES};

/// The identity of whoever is playing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub login: String,
}

impl Player {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.login)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Running => "running",
            Self::Won => "won",
            Self::Lost => "lost",
        };

        f.write_str(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("game is already {0}")]
pub struct InvalidStateError(pub GameStatus);

/// One player's game for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    player: Player,
    date: NaiveDate,
    status: GameStatus,
    word: Word,
    guesses: Vec<GuessResult>,
}

impl Game {
    pub fn new(player: Player, date: NaiveDate, word: Word) -> Self {
        Self {
            player,
            date,
            status: GameStatus::Running,
            word,
            guesses: Vec::with_capacity(MAX_GUESSES),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn guesses(&self) -> &[GuessResult] {
        &self.guesses
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn is_from(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    /// Scores `guess` against the answer and advances the game.
    ///
    /// A matching guess wins the game, and a miss on the last allowed guess
    /// loses it. Finished games are left untouched.
    pub fn apply_guess(&mut self, guess: &str) -> Result<&GuessResult, InvalidStateError> {
        if !self.is_running() {
            return Err(InvalidStateError(self.status));
        }

        let result = self.word.compare(guess);

        if result.is_match() {
            self.status = GameStatus::Won;
        } else if self.guesses.len() + 1 >= MAX_GUESSES {
            self.status = GameStatus::Lost;
        }

        info!(
            player = %self.player,
            guess = result.guess(),
            status = %self.status,
            "player guessed"
        );

        let index = self.guesses.len();
        self.guesses.push(result);

        Ok(&self.guesses[index])
    }

    pub fn view(&self) -> GameView {
        GameView {
            status: self.status,
            guesses: self.guesses.clone(),
        }
    }
}

/// The part of a [`Game`] that is safe to show the player: no answer, no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub status: GameStatus,
    pub guesses: Vec<GuessResult>,
}

impl GameView {
    pub fn title(&self) -> String {
        format!("wordle {}/{MAX_GUESSES} ({})", self.guesses.len(), self.status)
    }
}

impl AsEmoji for GameView {
    fn as_emoji(&self) -> Cow<str> {
        self.guesses.as_emoji()
    }

    fn emoji_with_letters(&self) -> String {
        self.guesses.emoji_with_letters()
    }

    fn emoji_with_letters_spaced(&self) -> String {
        self.guesses.emoji_with_letters_spaced()
    }
}
