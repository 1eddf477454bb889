use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{
    core::Word,
    daily::{Clock, DailyWord, UtcClock},
    game::{Game, Player},
    store::KvStore,
    words_list::{random_answer, WordsSource},
    Error,
};

type Result<T, E = Error> = std::result::Result<T, E>;

const WORD_KEY: &str = "word";

fn game_key(player: &Player) -> String {
    format!("games.{}", player.login())
}

/// Loads and saves daily games and the shared daily word.
///
/// The daily word is refreshed with a read followed by a write and no
/// compare-and-set, so two requests racing on the first call of a day can each
/// draw and store a different word. The last write wins, and games already
/// created keep whichever word they were created with.
#[derive(Debug, Clone)]
pub struct Games<Store, Words, C = UtcClock> {
    store: Store,
    words: Words,
    clock: C,
}

impl<Store, Words> Games<Store, Words> {
    pub fn new(store: Store, words: Words) -> Self {
        Self::with_clock(store, words, UtcClock)
    }
}

impl<Store, Words, C> Games<Store, Words, C> {
    pub fn with_clock(store: Store, words: Words, clock: C) -> Self {
        Self {
            store,
            words,
            clock,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl<Store, Words, C> Games<Store, Words, C>
where
    Store: KvStore,
    Words: WordsSource,
    C: Clock,
{
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Today's game for `player`, or a fresh one if they haven't played today.
    #[instrument(skip_all, fields(player = %player))]
    pub async fn load_or_create(&self, player: &Player) -> Result<Game> {
        if let Some(game) = self.find_today(player).await? {
            debug!(guesses = game.guesses().len(), status = %game.status(), "found game");
            return Ok(game);
        }

        let word = self.current_daily_word().await?;

        debug!("starting new game");

        Ok(Game::new(player.clone(), self.today(), word))
    }

    /// Today's stored game for `player`, ignoring games from earlier days.
    pub async fn find_today(&self, player: &Player) -> Result<Option<Game>> {
        let today = self.today();

        Ok(self
            .load::<Game>(&game_key(player))
            .await?
            .filter(|game| game.is_from(today)))
    }

    pub async fn save(&self, game: &Game) -> Result<()> {
        self.store
            .set(&game_key(game.player()), game)
            .await
            .map_err(Error::store)
    }

    /// The word every player is guessing today, drawing a new one on the first call of the day.
    #[instrument(skip_all)]
    pub async fn current_daily_word(&self) -> Result<Word> {
        let today = self.today();

        if let Some(daily) = self
            .load::<DailyWord>(WORD_KEY)
            .await?
            .filter(|daily| daily.is_from(today))
        {
            return Ok(daily.word);
        }

        let words = self.words.words().await?;
        let word = random_answer(&words)?;

        self.store
            .set(WORD_KEY, &DailyWord::new(word.clone(), today))
            .await
            .map_err(Error::store)?;

        info!(%today, candidates = words.len(), "picked new daily word");

        Ok(word)
    }

    /// Reads `key`, treating a record that no longer deserializes as absent.
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self
            .store
            .get::<serde_json::Value>(key)
            .await
            .map_err(Error::store)?
        else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(key, %err, "ignoring unreadable record");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::Games;
    use crate::wordle::{
        core::Word,
        daily::DailyWord,
        error::WordsError,
        game::{GameStatus, Player},
        store::{KvStore, MemoryStore},
        Error, WordsList,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn games(store: &MemoryStore, date: NaiveDate) -> Games<MemoryStore, WordsList, NaiveDate> {
        Games::with_clock(
            store.clone(),
            WordsList::from_words(["amber", "crane", "today", "mummy", "opals"]),
            date,
        )
    }

    #[tokio::test]
    async fn daily_word_stable_within_day() -> Result<(), Error> {
        let store = MemoryStore::new();
        let games = games(&store, day(14));

        let first = games.current_daily_word().await?;
        for _ in 0..10 {
            assert_eq!(games.current_daily_word().await?, first);
        }

        let stored: DailyWord = store.get("word").await.unwrap().unwrap();
        assert_eq!(stored, DailyWord::new(first, day(14)));

        Ok(())
    }

    #[tokio::test]
    async fn daily_word_refreshes_next_day() -> Result<(), Error> {
        let store = MemoryStore::new();
        store
            .set("word", &DailyWord::new(Word::from_str("zzzzz").unwrap(), day(13)))
            .await
            .unwrap();

        let word = games(&store, day(14)).current_daily_word().await?;
        assert_ne!(word.to_string(), "zzzzz");

        let stored: DailyWord = store.get("word").await.unwrap().unwrap();
        assert_eq!(stored.date, day(14));

        Ok(())
    }

    #[tokio::test]
    async fn stored_word_from_today_is_kept() -> Result<(), Error> {
        let store = MemoryStore::new();
        store
            .set("word", &DailyWord::new(Word::from_str("zzzzz").unwrap(), day(14)))
            .await
            .unwrap();

        let word = games(&store, day(14)).current_daily_word().await?;
        assert_eq!(word.to_string(), "zzzzz");

        Ok(())
    }

    #[tokio::test]
    async fn empty_word_list() {
        let store = MemoryStore::new();
        let games = Games::with_clock(store.clone(), WordsList::default(), day(14));

        let err = games.current_daily_word().await.unwrap_err();
        assert!(matches!(err, Error::Words(WordsError::NoWord(0))));
        assert_eq!(err.status(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_new_daily_word() {
        let store = MemoryStore::new();
        games(&store, day(14)).current_daily_word().await.unwrap();

        assert!(logs_contain("picked new daily word"));
    }

    #[tokio::test]
    async fn load_or_create_same_day() -> Result<(), Error> {
        let store = MemoryStore::new();
        let games = games(&store, day(14));
        let annie = Player::new("annie");

        let mut game = games.load_or_create(&annie).await?;
        assert_eq!(game.status(), GameStatus::Running);
        assert!(game.guesses().is_empty());
        assert_eq!(game.date(), day(14));

        game.apply_guess("plumb").unwrap();
        games.save(&game).await?;

        let again = games.load_or_create(&annie).await?;
        assert_eq!(again, game);
        assert_eq!(games.load_or_create(&annie).await?, again);

        Ok(())
    }

    #[tokio::test]
    async fn load_or_create_new_day() -> Result<(), Error> {
        let store = MemoryStore::new();
        let annie = Player::new("annie");

        let yesterday = games(&store, day(13));
        let mut game = yesterday.load_or_create(&annie).await?;
        game.apply_guess("plumb").unwrap();
        yesterday.save(&game).await?;

        let today = games(&store, day(14));
        let fresh = today.load_or_create(&annie).await?;

        assert!(fresh.guesses().is_empty());
        assert_eq!(fresh.date(), day(14));
        assert_eq!(fresh.status(), GameStatus::Running);

        Ok(())
    }

    #[tokio::test]
    async fn players_share_word_not_games() -> Result<(), Error> {
        let store = MemoryStore::new();
        let games = games(&store, day(14));

        let mut annie = games.load_or_create(&Player::new("annie")).await?;
        annie.apply_guess("plumb").unwrap();
        games.save(&annie).await?;

        let bob = games.load_or_create(&Player::new("bob")).await?;

        assert_eq!(bob.word(), annie.word());
        assert!(bob.guesses().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn find_today_ignores_stale_games() -> Result<(), Error> {
        let store = MemoryStore::new();
        let annie = Player::new("annie");

        assert_eq!(games(&store, day(13)).find_today(&annie).await?, None);

        let yesterday = games(&store, day(13));
        let game = yesterday.load_or_create(&annie).await?;
        yesterday.save(&game).await?;

        assert_eq!(yesterday.find_today(&annie).await?, Some(game));
        assert_eq!(games(&store, day(14)).find_today(&annie).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn games_are_keyed_by_login() -> Result<(), Error> {
        let store = MemoryStore::new();
        let games = games(&store, day(14));

        let game = games.load_or_create(&Player::new("annie")).await?;
        games.save(&game).await?;

        assert!(store.get::<serde_json::Value>("games.annie").await.unwrap().is_some());

        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn unreadable_game_starts_fresh() -> Result<(), Error> {
        let store = MemoryStore::new();
        store
            .set("games.annie", &serde_json::json!({ "player": "annie", "word": 5 }))
            .await
            .unwrap();

        let games = games(&store, day(14));
        let annie = Player::new("annie");

        assert_eq!(games.find_today(&annie).await?, None);
        assert!(logs_contain("ignoring unreadable record"));

        let mut game = games.load_or_create(&annie).await?;
        assert_eq!(game.status(), GameStatus::Running);
        game.apply_guess("plumb").unwrap();
        games.save(&game).await?;

        assert_eq!(games.find_today(&annie).await?, Some(game));

        Ok(())
    }

    #[tokio::test]
    async fn unreadable_daily_word_is_redrawn() -> Result<(), Error> {
        let store = MemoryStore::new();
        store.set("word", &"crane").await.unwrap();

        let word = games(&store, day(14)).current_daily_word().await?;

        let stored: DailyWord = store.get("word").await.unwrap().unwrap();
        assert_eq!(stored, DailyWord::new(word, day(14)));

        Ok(())
    }
}
