//! watsonx.ai integration for wxask
//!
//! This crate provides the IBM Cloud IAM token exchange and the watsonx.ai chat
//! implementation of the `LLMProvider` trait.

mod auth;
mod client;
mod config;


pub use auth::{AccessToken, IamAuthenticator};
pub use client::WatsonxClient;
pub use config::{WatsonxConfig, mask};

// Re-export core types for convenience
pub use wxask_core::{Error, GenerationOptions, LLMProvider, Result, extract_text};
