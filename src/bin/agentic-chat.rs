#[path = "agentic-chat/app.rs"]
mod app;
#[path = "agentic-chat/args.rs"]
mod args;
#[path = "agentic-chat/logging.rs"]
mod logging;
#[path = "agentic-chat/render.rs"]
mod render;
#[path = "agentic-chat/repl.rs"]
mod repl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
