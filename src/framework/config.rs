use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, trace};

use crate::wordle::{GithubWords, Words, WordsError, WordsList};

const DEFAULT_PATH: &str = "./gh-wordle.toml";
const PATH_VAR: &str = "GH_WORDLE_TOML";
const ENV_PREFIX: &str = "GH_WORDLE";

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("couldn't load config: {0}")]
    #[event(level = ERROR)]
    Load(#[from] ::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub words: WordsConfig,
    #[serde(default)]
    pub wordle: WordleConfig,
}

impl Config {
    /// The config file named by `path`, then `GH_WORDLE_TOML`, then `./gh-wordle.toml`.
    pub fn path(path: Option<&Path>) -> PathBuf {
        if let Some(path) = path {
            return path.to_owned();
        }

        match std::env::var(PATH_VAR) {
            Ok(var) => {
                trace!(var = PATH_VAR, value = var, "using value from environment");
                var.into()
            }
            Err(_) => DEFAULT_PATH.into(),
        }
    }

    /// Reads the TOML file at `path`, with `GH_WORDLE__SECTION__KEY` variables on top.
    #[tracing::instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = Self::path(path);

        let config = ::config::Config::builder()
            .add_source(::config::File::new(
                &path.to_string_lossy(),
                ::config::FileFormat::Toml,
            ))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        debug!(path = %path.display(), "loaded config");

        Ok(config)
    }

    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        Ok(::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DbConfig {
    url: String,
    #[serde(default = "DbConfig::default_name")]
    name: String,
    username: Option<String>,
    password: Option<Secret>,
}

impl DbConfig {
    fn default_name() -> String {
        "gh-wordle".to_owned()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Username and password, if both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_ref()?.expose()))
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum WordsConfig {
    Github {
        repository: RepoName,
        #[serde(default = "WordsConfig::default_path")]
        path: String,
        token: Option<Secret>,
        api: Option<url::Url>,
    },
    File {
        path: PathBuf,
    },
}

impl WordsConfig {
    fn default_path() -> String {
        "words.json".to_owned()
    }

    /// Builds the configured words source. Files are read immediately.
    ///
    /// A GitHub source without a token falls back to `GITHUB_TOKEN`.
    pub fn source(&self) -> Result<Words, WordsError> {
        match self {
            Self::Github {
                repository,
                path,
                token,
                api,
            } => {
                let token = token
                    .as_ref()
                    .map(|token| token.expose().to_owned())
                    .or_else(|| std::env::var("GITHUB_TOKEN").ok());

                let mut github = GithubWords::new(repository.clone(), path).with_token(token);

                if let Some(api) = api {
                    github = github.with_api(api.clone());
                }

                Ok(Words::Github(github))
            }
            Self::File { path } => Ok(Words::List(WordsList::load(path)?)),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WordleConfig {
    /// Reject guesses that aren't in the words list, not just ones of the wrong length.
    pub validate_guesses: bool,
}

/// A string that doesn't show up in debug output.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct RepoName {
    user: String,
    repo: String,
}

impl std::fmt::Display for RepoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}

impl RepoName {
    fn new(user: String, repo: String) -> Self {
        Self { user, repo }
    }

    pub fn try_from_str(s: &str) -> Option<Self> {
        let (user, repo) = s.split_once('/')?;

        if user.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }

        Some(Self::new(user.to_owned(), repo.to_owned()))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl TryFrom<String> for RepoName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_str(&value).ok_or_else(|| format!("`{value}` is not an owner/repo name"))
    }
}
