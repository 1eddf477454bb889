use thiserror::Error as ThisError;
use thisslime::TracingError;

#[derive(Debug, ThisError, TracingError)]
#[span]
pub enum Error {
    #[error(transparent)]
    Config(#[from] crate::framework::config::Error),

    #[error("error from mongodb: {0}")]
    #[event(level = ERROR)]
    MongoDb(#[from] mongodb::error::Error),

    #[error(transparent)]
    Words(#[from] crate::wordle::WordsError),

    #[error(transparent)]
    Wordle(#[from] crate::wordle::Error),
}
