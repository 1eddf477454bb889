use std::path::PathBuf;

use crate::wordle::{core::GameStyle, Method, Player, Request};

/// Play today's wordle from the command line.
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Config file to read instead of `./gh-wordle.toml`.
    #[arg(long, env = "GH_WORDLE_TOML")]
    pub config: Option<PathBuf>,

    /// How to draw the board.
    #[arg(long, value_enum, default_value_t)]
    pub style: GameStyle,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit a guess for today's word.
    Guess {
        word: String,

        #[arg(long, env = "GH_WORDLE_PLAYER")]
        player: Option<String>,
    },

    /// Show today's game.
    Show {
        #[arg(long, env = "GH_WORDLE_PLAYER")]
        player: Option<String>,
    },

    /// Print the loaded config and exit.
    Config,
}

impl Command {
    /// The request this command stands for, if it makes one.
    pub fn request(&self) -> Option<Request> {
        match self {
            Self::Guess { word, player } => Some(Request {
                method: Method::Post,
                guess: Some(word.clone()),
                sender: player.as_deref().map(Player::new),
            }),
            Self::Show { player } => Some(Request {
                method: Method::Get,
                guess: None,
                sender: player.as_deref().map(Player::new),
            }),
            Self::Config => None,
        }
    }
}
