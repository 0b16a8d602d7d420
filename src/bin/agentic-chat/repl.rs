use std::io::{self, Write};
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};

use agentic_chat::{
    config::UiConfig,
    orchestrator::{Orchestrator, TurnRequest, UseCase},
    session::Session,
    status,
};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    History,
    Status,
    Model(Option<String>),
    UseCase(Option<String>),
    Help,
    Quit,
    Unknown(String),
}

/// Parses a slash command; plain messages yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let rest = line.trim().strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };
    let command = match name.to_lowercase().as_str() {
        "clear" | "new" => Command::Clear,
        "history" => Command::History,
        "status" => Command::Status,
        "model" => Command::Model(arg),
        "usecase" => Command::UseCase(arg),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

pub struct Repl<'a> {
    pub orchestrator: &'a Orchestrator,
    pub session: Session,
    pub request: TurnRequest,
    pub ui: UiConfig,
    pub client: reqwest::Client,
}

impl Repl<'_> {
    pub async fn run(mut self) -> anyhow::Result<()> {
        render::print_help();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("[{} | {}] > ", self.request.usecase, self.request.model_id);
            io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Some(Command::Quit) => break,
                Some(command) => self.handle(command).await,
                None => self.turn(line).await,
            }
        }
        Ok(())
    }

    pub async fn turn(&mut self, message: &str) {
        match self
            .orchestrator
            .process_turn(&mut self.session, &self.request, message)
            .await
        {
            Ok(reply) => render::print_reply(reply.as_deref()),
            Err(err) => {
                log::error!("turn failed: {err}");
                render::print_turn_error(&self.client, &err).await;
            }
        }
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Clear => {
                self.orchestrator.reset_session(&mut self.session).await;
                println!("Started a new session ({})", self.session.id());
            }
            Command::History => render::print_history(&self.session),
            Command::Status => {
                let status = status::check_groq_status(&self.client, status::GROQ_STATUS_URL).await;
                println!("Groq status: {}", render::describe_status(&status));
            }
            Command::Model(None) => {
                println!("Current model: {}", self.request.model_id);
                println!("Available: {}", self.ui.groq_model_options.join(", "));
            }
            Command::Model(Some(id)) => {
                if self.ui.groq_model_options.contains(&id) {
                    println!("Model set to {id}");
                    self.request.model_id = id;
                } else {
                    println!(
                        "Unknown model {id}. Available: {}",
                        self.ui.groq_model_options.join(", ")
                    );
                }
            }
            Command::UseCase(None) => {
                println!("Current use case: {}", self.request.usecase);
                println!("Available: {}", self.ui.usecase_options.join(", "));
            }
            Command::UseCase(Some(name)) => match UseCase::from_str(&name) {
                Ok(usecase) => {
                    if usecase.needs_search_key() && self.request.credentials.search_key().is_none()
                    {
                        eprintln!("Warning: no Tavily API key set; web turns will fail.");
                    }
                    println!("Use case set to {usecase}");
                    self.request.usecase = usecase;
                }
                Err(e) => println!("{e}"),
            },
            Command::Help => render::print_help(),
            Command::Quit => {}
            Command::Unknown(name) => println!("Unknown command /{name}. Type /help."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello there"), None);
    }

    #[test]
    fn commands_take_optional_arguments() {
        assert_eq!(parse_command("/model"), Some(Command::Model(None)));
        assert_eq!(
            parse_command("/model  gemma2-9b-it "),
            Some(Command::Model(Some("gemma2-9b-it".into())))
        );
        assert_eq!(
            parse_command("/usecase Chatbot With Web"),
            Some(Command::UseCase(Some("Chatbot With Web".into())))
        );
    }

    #[test]
    fn aliases_and_unknown_commands() {
        assert_eq!(parse_command("/EXIT"), Some(Command::Quit));
        assert_eq!(parse_command("/new"), Some(Command::Clear));
        assert_eq!(parse_command("/bogus"), Some(Command::Unknown("bogus".into())));
    }
}
