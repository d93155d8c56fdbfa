//! # jester-providers
//!
//! Joke source implementations for Jester.

pub mod jokeapi;
