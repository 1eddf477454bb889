use std::borrow::Cow;

mod word;
pub use word::{lowercase, ParseWordError, Word};

mod guess;
pub use guess::{GuessResult, LetterState};

pub const WORD_LENGTH: usize = 5;
pub const MAX_GUESSES: usize = 6;

/// How a board of guesses is rendered as emoji.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GameStyle {
    #[value(alias = "hidden")]
    Colors,
    #[default]
    Letters,
    #[value(alias = "spaced-letters")]
    Spaced,
}

pub trait AsEmoji {
    fn as_emoji(&self) -> Cow<str>;

    fn emoji_with_letters(&self) -> String {
        self.as_emoji().into()
    }

    fn emoji_with_letters_spaced(&self) -> String {
        self.emoji_with_letters()
    }

    fn emoji_with_style(&self, style: GameStyle) -> Cow<str> {
        match style {
            GameStyle::Colors => self.as_emoji(),
            GameStyle::Letters => self.emoji_with_letters().into(),
            GameStyle::Spaced => self.emoji_with_letters_spaced().into(),
        }
    }
}

impl AsEmoji for char {
    fn as_emoji(&self) -> Cow<str> {
        let alphabet_letters = 'a'..='z';
        let emoji_letters = '\u{1f1e6}'..='\u{1f1ff}';

        alphabet_letters
            .zip(emoji_letters)
            .find_map(|(letter, emoji)| (*self == letter).then_some(emoji))
            .map_or_else(|| self.to_string(), |emoji| emoji.to_string())
            .into()
    }
}

impl AsEmoji for Vec<LetterState> {
    fn as_emoji(&self) -> Cow<str> {
        self.iter()
            .map(|l| l.as_emoji())
            .collect::<Vec<_>>()
            .join("")
            .into()
    }
}

impl AsEmoji for Vec<GuessResult> {
    fn as_emoji(&self) -> Cow<str> {
        self.iter()
            .map(|g| g.as_emoji())
            .collect::<Vec<_>>()
            .join("\n")
            .into()
    }

    fn emoji_with_letters(&self) -> String {
        self.iter()
            .map(|g| g.emoji_with_letters())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn emoji_with_letters_spaced(&self) -> String {
        self.iter()
            .map(|g| g.emoji_with_letters_spaced())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
