use std::{collections::HashSet, fs, path::Path, str::FromStr};

use base64::Engine;
use rand::seq::IteratorRandom;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, instrument, warn};

use super::{
    core::{lowercase, Word},
    error::WordsError,
};
use crate::framework::config::RepoName;

type Result<T, E = WordsError> = std::result::Result<T, E>;

/// Where candidate answers come from.
pub trait WordsSource {
    async fn words(&self) -> Result<Vec<String>>;
}

/// Draws one answer uniformly from `words`, skipping entries that aren't valid words.
pub fn random_answer(words: &[String]) -> Result<Word> {
    words
        .iter()
        .filter_map(|word| match Word::from_str(word) {
            Ok(word) => Some(word),
            Err(err) => {
                warn!(%err, "skipping word");
                None
            }
        })
        .choose(&mut rand::thread_rng())
        .ok_or(WordsError::NoWord(words.len()))
}

#[derive(Debug, Clone, Default)]
pub struct WordsList {
    words: HashSet<String>,
}

impl WordsList {
    pub fn from_words(words: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|word| lowercase(word.as_ref().trim()))
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// Loads a list from a JSON array (`.json`) or a file with one word per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let list = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_words(serde_json::from_str::<Vec<String>>(&text)?)
        } else {
            Self::from_words(text.lines())
        };

        debug!(path = %path.display(), words = list.len(), "loaded words list");

        Ok(list)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&lowercase(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordsSource for WordsList {
    async fn words(&self) -> Result<Vec<String>> {
        Ok(self.words.iter().cloned().collect())
    }
}

/// A JSON array of words stored in a GitHub repository, read through the contents API.
#[derive(Debug, Clone)]
pub struct GithubWords {
    client: reqwest::Client,
    api: reqwest::Url,
    repository: RepoName,
    path: String,
    token: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct Contents {
    content: String,
}

impl GithubWords {
    pub const API: &'static str = "https://api.github.com";

    pub fn new(repository: RepoName, path: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api: reqwest::Url::parse(Self::API).expect("github api url should be valid"),
            repository,
            path: path.into(),
            token: None,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_api(mut self, api: reqwest::Url) -> Self {
        self.api = api;
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn contents_url(&self) -> Result<reqwest::Url, url::ParseError> {
        let base = if self.api.path().ends_with('/') {
            self.api.clone()
        } else {
            reqwest::Url::parse(&format!("{}/", self.api))?
        };

        base.join(&format!(
            "repos/{}/contents/{}",
            self.repository,
            self.path.trim_start_matches('/')
        ))
    }

    fn decode_contents(contents: &Contents) -> Result<Vec<String>> {
        let encoded = contents.content.split_whitespace().collect::<String>();
        let bytes = base64::prelude::BASE64_STANDARD.decode(encoded)?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl WordsSource for GithubWords {
    #[instrument(skip_all, fields(repository = %self.repository, path = %self.path))]
    async fn words(&self) -> Result<Vec<String>> {
        let url = self.contents_url()?;

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, "gh-wordle")
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        debug!(code = %response.status());

        if !response.status().is_success() {
            return Err(WordsError::Status(response.status()));
        }

        let contents: Contents = response.json().await?;
        Self::decode_contents(&contents)
    }
}

/// A words source picked at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Words {
    Github(GithubWords),
    List(WordsList),
}

impl WordsSource for Words {
    async fn words(&self) -> Result<Vec<String>> {
        match self {
            Self::Github(github) => github.words().await,
            Self::List(list) => list.words().await,
        }
    }
}
