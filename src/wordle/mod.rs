mod error;
pub use error::{Error, NotFoundError, ValidationError, WordsError};

pub mod core;

pub mod daily;
pub use daily::{Clock, DailyWord, UtcClock};

pub mod game;
pub use game::{Game, GameStatus, GameView, Player};

mod games;
pub use games::Games;

mod handler;
pub use handler::{Handler, Method, Request, Response};

pub mod store;

mod validate;
pub use validate::{GuessValidator, LengthCheck, Validation};

mod words_list;
pub use words_list::{random_answer, GithubWords, Words, WordsList, WordsSource};
