//! Terminal mode: ask for notes, stream the report, save it, repeat.

use crate::constants::INTERACTIVE_QUESTION;
use crate::errors::Error;
use crate::export::DocumentExporter;
use crate::llm::LlmClient;
use crate::report::Conversation;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// One terminal session; the conversation grows with every report.
pub struct Session<'a> {
    llm: &'a LlmClient,
    exporter: &'a dyn DocumentExporter,
    temperature: f32,
    /// Print chunks as they arrive instead of showing a spinner
    echo: bool,
    conversation: Conversation,
}

impl<'a> Session<'a> {
    pub fn new(
        llm: &'a LlmClient,
        exporter: &'a dyn DocumentExporter,
        temperature: f32,
        echo: bool,
    ) -> Self {
        Session {
            llm,
            exporter,
            temperature,
            echo,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Asks the model for a report on `notes` and saves it.
    ///
    /// # Returns
    /// * `Ok(Some(path))` - Report saved
    /// * `Ok(None)` - The model exchange failed; the failure was shown and logged
    /// * `Err(_)` - Saving the document failed
    pub async fn write_report(&mut self, notes: &str) -> Result<Option<PathBuf>, Error> {
        self.conversation.push_user(notes);

        let result = if self.echo {
            let mut echo = |text: &str| {
                print!("{}", text);
                let _ = io::stdout().flush();
            };
            let result = self
                .llm
                .chat(self.conversation.messages(), self.temperature, Some(&mut echo))
                .await;
            println!("\n");
            result
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("-\\|/ ")
                    .template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Verslag wordt geschreven...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            let result = self
                .llm
                .chat(self.conversation.messages(), self.temperature, None)
                .await;
            spinner.finish_and_clear();
            result
        };

        match result {
            Ok(reply) => {
                let path = self.exporter.save(&reply.content)?;
                self.conversation.push_reply(reply);
                Ok(Some(path))
            }
            Err(e) => {
                error!("Failed to generate response: {}", e);
                println!("{}", e.user_message().red());
                if e.is_connection_failure() {
                    println!("{}", "Controleer of de Ollama-server bereikbaar is.".yellow());
                }
                self.conversation.discard_pending();
                Ok(None)
            }
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}

/// Runs the question / report loop until the user enters nothing or declines another report.
pub async fn run(mut session: Session<'_>) -> Result<(), Error> {
    loop {
        let notes: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(INTERACTIVE_QUESTION)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        if notes.trim().is_empty() {
            println!("Geen invoer, afsluiten.");
            info!("No user input. Program exited.");
            break;
        }

        if let Some(path) = session.write_report(notes.trim()).await? {
            println!("✅ Verslag opgeslagen als {}", path.display().to_string().green());
        }

        let again = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Nog een verslag maken?")
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if !again {
            info!("User chose to exit.");
            break;
        }
    }
    Ok(())
}
