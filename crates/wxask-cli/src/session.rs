//! Read-generate-print loop

use colored::*;
use std::io::Write;
use tracing::debug;
use wxask_core::{GenerationOptions, LLMProvider, Result, extract_text};

use crate::ui::{PROMPT, PromptReader};

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub prompts: usize,
    pub failures: usize,
}

/// One interactive session against a single provider client
pub struct ChatSession<'a> {
    client: &'a dyn LLMProvider,
    options: GenerationOptions,
}

impl<'a> ChatSession<'a> {
    pub fn new(client: &'a dyn LLMProvider, options: GenerationOptions) -> Self {
        Self { client, options }
    }

    /// Run until an empty line, end of input, or interrupt.
    ///
    /// A failed generation is reported and the loop keeps going.
    pub async fn run<R, W>(&self, reader: &mut R, out: &mut W) -> Result<SessionSummary>
    where
        R: PromptReader,
        W: Write,
    {
        let mut summary = SessionSummary::default();

        writeln!(out, "Enter a question (empty to quit)")?;

        loop {
            write!(out, "\n{}", PROMPT)?;
            out.flush()?;

            let prompt = match reader.read_prompt()? {
                Some(line) if !line.is_empty() => line,
                _ => {
                    writeln!(out, "\n{}", "Exiting".yellow())?;
                    break;
                }
            };

            summary.prompts += 1;
            debug!(model = self.client.model_id(), "Sending prompt");

            match self.client.generate(&prompt, &self.options).await {
                Ok(response) => {
                    let text = extract_text(Some(&response));
                    writeln!(out, "\n{}", "--- Answer ---".green())?;
                    writeln!(out, "{}", text)?;
                }
                Err(e) => {
                    summary.failures += 1;
                    writeln!(out, "{} {}", "Error calling model:".red(), e)?;
                }
            }
        }

        Ok(summary)
    }
}
