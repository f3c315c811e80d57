//! Core traits and types for wxask
//!
//! This crate defines the error taxonomy, the `LLMProvider` trait implemented by
//! every generation client, and the response normalizer that turns raw provider
//! bodies into plain text.

pub mod error;
pub mod llm;
pub mod response;

#[cfg(test)]
mod tests;

pub use error::{Error, Result, truncate_body};
pub use llm::{GenerationOptions, LLMProvider, DEFAULT_MAX_TOKENS};
pub use response::extract_text;
