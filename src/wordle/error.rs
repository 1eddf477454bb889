use reqwest::StatusCode;

use super::game::{InvalidStateError, Player};

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error(transparent)]
    #[event(level = WARN)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[event(level = INFO)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Words(#[from] WordsError),

    #[error("store error: {0}")]
    #[event(level = ERROR)]
    Store(String),
}

impl Error {
    pub fn store(error: impl std::error::Error) -> Self {
        Self::Store(error.to_string())
    }

    pub fn invalid_guess(guess: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidGuess(guess.into()))
    }

    pub fn missing_player() -> Self {
        Self::Validation(ValidationError::MissingPlayer)
    }

    pub fn no_game_today(player: Player) -> Self {
        Self::NotFound(NotFoundError::NoGameToday(player))
    }

    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::NotFound(NotFoundError::UnsupportedMethod(method.into()))
    }

    /// The response status this error maps to, if it is a client-facing error.
    ///
    /// Word source and store failures have no status and are left to the caller.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation(_) => Some(StatusCode::BAD_REQUEST),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Words(_) | Self::Store(_) => None,
        }
    }
}

impl From<InvalidStateError> for Error {
    fn from(value: InvalidStateError) -> Self {
        Self::Validation(value.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("`{0}` is not a valid guess")]
    InvalidGuess(String),

    #[error("request has no player")]
    MissingPlayer,

    #[error(transparent)]
    GameOver(#[from] InvalidStateError),
}

#[derive(Debug, thiserror::Error)]
pub enum NotFoundError {
    #[error("{0} has no game today")]
    NoGameToday(Player),

    #[error("unsupported method `{0}`")]
    UnsupportedMethod(String),
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum WordsError {
    #[error("couldn't load words: {0}")]
    #[event(level = ERROR)]
    Reqwest(#[from] reqwest::Error),

    #[error("couldn't load words: source returned {0}")]
    #[event(level = ERROR)]
    Status(StatusCode),

    #[error("invalid words url: {0}")]
    #[event(level = ERROR)]
    Url(#[from] url::ParseError),

    #[error("couldn't read words file: {0}")]
    #[event(level = ERROR)]
    Io(#[from] std::io::Error),

    #[error("couldn't decode words: {0}")]
    #[event(level = ERROR)]
    Base64(#[from] base64::DecodeError),

    #[error("couldn't parse words: {0}")]
    #[event(level = ERROR)]
    Json(#[from] serde_json::Error),

    #[error("couldn't pick a word out of {0} candidates")]
    #[event(level = ERROR)]
    NoWord(usize),
}
