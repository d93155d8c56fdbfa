//! # jester-core
//!
//! Core types, traits, configuration, language resolution and error handling
//! for the Jester webhook.

pub mod config;
pub mod context;
pub mod error;
pub mod language;
pub mod message;
pub mod traits;
