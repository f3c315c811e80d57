//! Interactive session driver for wxask

mod config;
mod session;
mod ui;


pub use config::{AppConfig, ProviderConfig, build_provider};
pub use session::{ChatSession, SessionSummary};
pub use ui::{LineReader, PROMPT, PromptReader, TerminalReader, display_banner};

// Re-export core types
pub use wxask_core::{Error, Result};
