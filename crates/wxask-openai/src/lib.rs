//! OpenAI chat completions integration for wxask
//!
//! The API key is sent as the bearer value on every request; there is no token
//! exchange for this provider.

mod client;
mod config;

pub use client::OpenAIClient;
pub use config::OpenAIConfig;

pub use wxask_core::{Error, GenerationOptions, LLMProvider, Result};
