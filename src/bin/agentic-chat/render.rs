use std::io::{self, Write};

use agentic_chat::{
    orchestrator::{TurnError, GROQ_STATUS_PAGE},
    provision::{ErrorKind, Notice, ProgressSink},
    session::Session,
    status::{self, ServiceStatus},
};

/// Prints retry notices on stderr as they happen.
pub struct StderrProgress;

impl ProgressSink for StderrProgress {
    fn notify(&self, notice: &Notice) {
        eprintln!("{notice}");
        let _ = io::stderr().flush();
    }
}

pub fn print_reply(reply: Option<&str>) {
    match reply {
        Some(text) => println!("\n{text}\n"),
        None => println!("\n(no reply)\n"),
    }
}

/// Renders a classified failure with its guidance. Unavailable errors also
/// show the live status page reading.
pub async fn print_turn_error(client: &reqwest::Client, err: &TurnError) {
    let title = match err.kind() {
        ErrorKind::Unavailable => "Service unavailable",
        ErrorKind::RateLimited => "Rate limited",
        ErrorKind::Unauthorized => "Authentication error",
        ErrorKind::Other => "Error",
    };
    eprintln!("+-- {title}");
    eprintln!("| {err}");
    eprintln!("| {}", err.guidance());
    if err.kind() == ErrorKind::Unavailable {
        let status = status::check_groq_status(client, status::GROQ_STATUS_URL).await;
        eprintln!("| Groq status: {}", describe_status(&status));
        eprintln!("| Status page: {GROQ_STATUS_PAGE}");
    }
    eprintln!("+--");
}

pub fn describe_status(status: &ServiceStatus) -> String {
    if status.is_operational {
        format!("operational ({})", status.description)
    } else {
        format!("{} [{}]", status.description, status.indicator)
    }
}

pub fn print_history(session: &Session) {
    if session.history().is_empty() {
        println!("(history is empty)");
        return;
    }
    for entry in session.history() {
        println!("{}: {}", entry.role, entry.content);
    }
}

pub fn print_help() {
    println!(
        "Commands:\n  \
         /clear           start a new session\n  \
         /history         show this session's messages\n  \
         /status          check the Groq service status\n  \
         /model <id>      switch model\n  \
         /usecase <name>  switch use case\n  \
         /help            show this help\n  \
         /quit            exit"
    );
}
