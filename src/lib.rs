#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]
#![allow(async_fn_in_trait)]

pub mod cli;

mod errors;
pub use errors::Error;

pub mod framework;

pub mod wordle;
