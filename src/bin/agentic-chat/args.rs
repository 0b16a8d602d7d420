use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "agentic-chat",
    about = "Chat with Groq-hosted models, optionally backed by web search and site retrieval"
)]
pub struct CliArgs {
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Groq model id, one of the configured options
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    /// "Basic Chatbot" or "Chatbot With Web"
    #[arg(long, short = 'u')]
    pub usecase: Option<String>,
    #[arg(long)]
    pub llm: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub search_api_key: Option<String>,
    /// Send one message, print the reply and exit
    #[arg(long, short = 'p')]
    pub prompt: Option<String>,
    #[arg(long)]
    pub list_models: bool,
    #[arg(long)]
    pub list_usecases: bool,
}
