//! Utility functions shared by the models, renderer and services
//!
//! - [`strip_markdown`] / [`count_words`] - plain text for excerpts, search and reading time
//! - [`detect_language`] - regex-based source language guessing for code snippets

mod language;
mod markdown;

pub use language::{detect_language, PLAINTEXT};
pub use markdown::{count_words, strip_markdown};
