use std::str::FromStr;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    core::{AsEmoji, GameStyle},
    daily::{Clock, UtcClock},
    game::{GameView, Player},
    games::Games,
    store::KvStore,
    validate::{GuessValidator, LengthCheck},
    words_list::WordsSource,
    Error,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "get" => Self::Get,
            "post" => Self::Post,
            _ => Self::Other(s.to_owned()),
        })
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
            Self::Other(method) => f.write_str(method),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub guess: Option<String>,
    pub sender: Option<Player>,
}

impl Request {
    pub fn get(sender: Player) -> Self {
        Self {
            method: Method::Get,
            guess: None,
            sender: Some(sender),
        }
    }

    pub fn post(sender: Player, guess: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            guess: Some(guess.into()),
            sender: Some(sender),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<GameView>,
}

fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl Response {
    pub fn ok(body: GameView) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// The body rendered as an emoji board, if there is one.
    pub fn board(&self, style: GameStyle) -> Option<String> {
        self.body
            .as_ref()
            .map(|view| format!("{}\n{}", view.title(), view.emoji_with_style(style)))
    }
}

/// Dispatches guess requests against the daily game.
#[derive(Debug, Clone)]
pub struct Handler<Store, Words, V = LengthCheck, C = UtcClock> {
    games: Games<Store, Words, C>,
    validator: V,
}

impl<Store, Words, C> Handler<Store, Words, LengthCheck, C> {
    pub fn new(games: Games<Store, Words, C>) -> Self {
        Self::with_validator(games, LengthCheck)
    }
}

impl<Store, Words, V, C> Handler<Store, Words, V, C> {
    pub fn with_validator(games: Games<Store, Words, C>, validator: V) -> Self {
        Self { games, validator }
    }

    pub fn games(&self) -> &Games<Store, Words, C> {
        &self.games
    }
}

impl<Store, Words, V, C> Handler<Store, Words, V, C>
where
    Store: KvStore,
    Words: WordsSource,
    V: GuessValidator,
    C: Clock,
{
    /// Handles one request.
    ///
    /// Client errors come back as a response with a 400 or 404 status. Word
    /// source and store failures are returned as `Err`.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn handle(&self, request: Request) -> Result<Response, Error> {
        match self.dispatch(request).await {
            Ok(view) => Ok(Response::ok(view)),
            Err(err) => match err.status() {
                Some(status) => {
                    debug!(%err, %status, "rejected request");
                    Ok(Response::status(status))
                }
                None => Err(err),
            },
        }
    }

    async fn dispatch(&self, request: Request) -> Result<GameView, Error> {
        match request.method {
            Method::Post => {
                self.post(request.sender, request.guess.unwrap_or_default())
                    .await
            }
            Method::Get => self.get(request.sender).await,
            Method::Other(method) => Err(Error::unsupported_method(method)),
        }
    }

    async fn post(&self, sender: Option<Player>, guess: String) -> Result<GameView, Error> {
        if !self.validator.is_valid_word(&guess) {
            return Err(Error::invalid_guess(guess));
        }

        let player = sender.ok_or_else(Error::missing_player)?;
        let mut game = self.games.load_or_create(&player).await?;

        if game.is_running() {
            game.apply_guess(&guess)?;
            self.games.save(&game).await?;
        }

        Ok(game.view())
    }

    async fn get(&self, sender: Option<Player>) -> Result<GameView, Error> {
        let player = sender.ok_or_else(Error::missing_player)?;

        match self.games.find_today(&player).await? {
            Some(game) => Ok(game.view()),
            None => Err(Error::no_game_today(player)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    use super::{Handler, Method, Request, Response};
    use crate::wordle::{
        core::{GameStyle, LetterState},
        game::{Game, GameStatus, Player},
        games::Games,
        store::{KvStore, MemoryStore},
        Error, Validation, WordsList,
    };

    type TestHandler = Handler<MemoryStore, WordsList, Validation, NaiveDate>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    /// A handler whose daily word is always `crane`.
    fn test_handler(store: &MemoryStore, date: NaiveDate) -> TestHandler {
        let games = Games::with_clock(store.clone(), WordsList::from_words(["crane"]), date);
        Handler::with_validator(games, Validation::default())
    }

    fn annie() -> Player {
        Player::new("annie")
    }

    #[test]
    fn methods_parse() {
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("Get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!(
            "DELETE".parse::<Method>().unwrap(),
            Method::Other("DELETE".to_owned())
        );
    }

    #[tokio::test]
    async fn post_guess() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler.handle(Request::post(annie(), "trace")).await?;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body.unwrap();
        assert_eq!(body.status, GameStatus::Running);
        assert_eq!(body.guesses.len(), 1);
        assert_eq!(
            body.guesses[0].matches(),
            &[
                LetterState::NotPresent,
                LetterState::Correct,
                LetterState::Correct,
                LetterState::WrongPlace,
                LetterState::Correct,
            ]
        );

        let stored: Game = store.get("games.annie").await.unwrap().unwrap();
        assert_eq!(stored.guesses().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn multi_char_lowercase_keeps_one_mark_per_letter() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let guess = "\u{130}abcd";
        let response = handler.handle(Request::post(annie(), guess)).await?;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.body.unwrap();
        assert_eq!(body.guesses[0].matches().len(), 5);
        assert_eq!(body.guesses[0].guess(), guess);

        let stored: Game = store.get("games.annie").await.unwrap().unwrap();
        assert_eq!(stored.guesses()[0].guess(), guess);

        Ok(())
    }

    #[tokio::test]
    async fn post_invalid_guess() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        for guess in ["", "cran", "cranes"] {
            let response = handler.handle(Request::post(annie(), guess)).await?;
            assert_eq!(response, Response::status(StatusCode::BAD_REQUEST));
        }

        let response = handler
            .handle(Request {
                method: Method::Post,
                guess: None,
                sender: Some(annie()),
            })
            .await?;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        assert!(store.is_empty().await);

        Ok(())
    }

    #[tokio::test]
    async fn post_without_player() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler
            .handle(Request {
                method: Method::Post,
                guess: Some("trace".to_owned()),
                sender: None,
            })
            .await?;

        assert_eq!(response, Response::status(StatusCode::BAD_REQUEST));
        assert!(store.is_empty().await);

        Ok(())
    }

    #[tokio::test]
    async fn win_then_no_more_guesses() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler.handle(Request::post(annie(), "CRANE")).await?;
        let body = response.body.unwrap();
        assert_eq!(body.status, GameStatus::Won);
        assert!(body.guesses[0].is_match());

        let response = handler.handle(Request::post(annie(), "trace")).await?;
        assert_eq!(response.status, StatusCode::OK);
        let body = response.body.unwrap();
        assert_eq!(body.status, GameStatus::Won);
        assert_eq!(body.guesses.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn six_misses_lose() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        for n in 1..=6 {
            let response = handler.handle(Request::post(annie(), "plumb")).await?;
            let body = response.body.unwrap();
            assert_eq!(body.guesses.len(), n);

            if n < 6 {
                assert_eq!(body.status, GameStatus::Running);
            } else {
                assert_eq!(body.status, GameStatus::Lost);
            }
        }

        let response = handler.handle(Request::post(annie(), "crane")).await?;
        let body = response.body.unwrap();
        assert_eq!(body.status, GameStatus::Lost);
        assert_eq!(body.guesses.len(), 6);

        Ok(())
    }

    #[tokio::test]
    async fn get_game() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler.handle(Request::get(annie())).await?;
        assert_eq!(response, Response::status(StatusCode::NOT_FOUND));

        let posted = handler.handle(Request::post(annie(), "trace")).await?;
        let fetched = handler.handle(Request::get(annie())).await?;
        assert_eq!(fetched, posted);

        let tomorrow = test_handler(&store, today().succ_opt().unwrap());
        let response = tomorrow.handle(Request::get(annie())).await?;
        assert_eq!(response, Response::status(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn new_day_resets_finished_game() -> Result<(), Error> {
        let store = MemoryStore::new();

        let response = test_handler(&store, today())
            .handle(Request::post(annie(), "crane"))
            .await?;
        assert_eq!(response.body.unwrap().status, GameStatus::Won);

        let response = test_handler(&store, today().succ_opt().unwrap())
            .handle(Request::post(annie(), "trace"))
            .await?;
        let body = response.body.unwrap();
        assert_eq!(body.status, GameStatus::Running);
        assert_eq!(body.guesses.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn unsupported_method() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler
            .handle(Request {
                method: Method::Other("DELETE".to_owned()),
                guess: Some("crane".to_owned()),
                sender: Some(annie()),
            })
            .await?;

        assert_eq!(response, Response::status(StatusCode::NOT_FOUND));
        assert!(store.is_empty().await);

        Ok(())
    }

    #[tokio::test]
    async fn word_source_failure_is_propagated() {
        let store = MemoryStore::new();
        let games = Games::with_clock(store.clone(), WordsList::default(), today());
        let handler = Handler::new(games);

        let result = handler.handle(Request::post(annie(), "crane")).await;
        assert!(matches!(result, Err(Error::Words(_))));
    }

    #[tokio::test]
    async fn list_validation() -> Result<(), Error> {
        let store = MemoryStore::new();
        let games = Games::with_clock(store.clone(), WordsList::from_words(["crane"]), today());
        let handler = Handler::with_validator(
            games,
            Validation::List(WordsList::from_words(["crane", "trace"])),
        );

        let response = handler.handle(Request::post(annie(), "zzzzz")).await?;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = handler.handle(Request::post(annie(), "trace")).await?;
        assert_eq!(response.status, StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn board() -> Result<(), Error> {
        let store = MemoryStore::new();
        let handler = test_handler(&store, today());

        let response = handler.handle(Request::post(annie(), "trace")).await?;
        assert_eq!(
            response.board(GameStyle::Colors).as_deref(),
            Some("wordle 1/6 (running)\n⬛🟩🟩🟨🟩")
        );

        assert_eq!(Response::status(StatusCode::NOT_FOUND).board(GameStyle::Colors), None);

        Ok(())
    }

    #[test]
    fn response_json() {
        let json = serde_json::to_value(Response::status(StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": 404 }));
    }
}
