#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::process::ExitCode;

use clap::Parser;
use thisslime::TracingError;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use tracing_unwrap::ResultExt;

use gh_wordle::{
    cli::Cli,
    framework::{self, Config},
    wordle::{store::MongoStore, Games, Handler, Response, Validation, WordsList, WordsSource},
    Error,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    framework::logging::init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "starting gh-wordle");

    let cli = Cli::parse();

    match run(cli).await {
        Ok(response) => {
            if response.status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(err) => {
            err.trace();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Response, Error> {
    let config = Config::load(cli.config.as_deref())?;

    let Some(request) = cli.command.request() else {
        println!("{config:#?}");
        return Ok(Response::status(reqwest::StatusCode::OK));
    };

    let db = framework::db::database(&config.db)?;
    let store = MongoStore::from_database(&db);
    let words = config.words.source()?;

    let validation = if config.wordle.validate_guesses {
        let list = WordsList::from_words(words.words().await?);
        debug!(words = list.len(), "validating guesses against words list");
        Validation::List(list)
    } else {
        Validation::default()
    };

    let handler = Handler::with_validator(Games::new(store, words), validation);
    let response = handler.handle(request).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).expect_or_log("responses should serialize")
    );

    if let Some(board) = response.board(cli.style) {
        println!("{board}");
    }

    Ok(response)
}
