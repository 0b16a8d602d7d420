use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, bail};
use clap::Parser;

use agentic_chat::{
    builder::LLMBackend,
    config::{load_config, AppConfig, UiConfig},
    observer::LogObserver,
    orchestrator::{Orchestrator, TurnRequest, UseCase},
    provision::{Credentials, GroqFactory, Provisioner},
    session::Session,
    tools::StandardToolLoader,
};

use crate::args::CliArgs;
use crate::logging::init_logging;
use crate::render::StderrProgress;
use crate::repl::Repl;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    if let Some(issue) = &loaded.issue {
        eprintln!(
            "Warning: ignoring {} ({issue}); using defaults",
            loaded.paths.config_file.display()
        );
    }
    let config = loaded.config;

    if args.list_models {
        config.ui.groq_model_options.iter().for_each(|m| println!("{m}"));
        return Ok(());
    }
    if args.list_usecases {
        config.ui.usecase_options.iter().for_each(|u| println!("{u}"));
        return Ok(());
    }

    println!("{}", config.ui.page_title);
    let backend = select_backend(&args, &config.ui)?;
    let model_id = select_model(&args, &config.ui)?;
    let usecase = select_usecase(&args, &config.ui)?;
    let credentials = Credentials::resolve(args.api_key.clone(), args.search_api_key.clone());
    warn_missing_keys(backend, usecase, &credentials);

    let orchestrator = build_orchestrator(&config);
    let mut repl = Repl {
        orchestrator: &orchestrator,
        session: Session::new(),
        request: TurnRequest {
            usecase,
            model_id,
            credentials,
        },
        ui: config.ui.clone(),
        client: reqwest::Client::new(),
    };
    log::info!(
        "session {} started with {} / {}",
        repl.session.id(),
        repl.request.usecase,
        repl.request.model_id
    );

    if let Some(prompt) = args.prompt.as_deref() {
        repl.turn(prompt).await;
        return Ok(());
    }
    repl.run().await
}

fn build_orchestrator(config: &AppConfig) -> Orchestrator {
    let observer = Arc::new(LogObserver);
    let provisioner = Provisioner::new(
        Arc::new(GroqFactory::new(config.provision.groq_settings())),
        config.provision.retry_config(),
    )
    .with_progress(Arc::new(StderrProgress))
    .with_observer(observer.clone());
    let loader = StandardToolLoader::new(config.search.clone(), config.retrieval.clone())
        .with_observer(observer.clone());
    Orchestrator::new(provisioner, Arc::new(loader)).with_observer(observer)
}

fn select_backend(args: &CliArgs, ui: &UiConfig) -> anyhow::Result<LLMBackend> {
    let label = args
        .llm
        .clone()
        .or_else(|| ui.llm_options.first().cloned())
        .ok_or_else(|| anyhow!("no LLM option configured"))?;
    if !ui.llm_options.iter().any(|o| o.eq_ignore_ascii_case(&label)) {
        bail!(
            "LLM option {label} is not configured; choose one of: {}",
            ui.llm_options.join(", ")
        );
    }
    Ok(LLMBackend::from_str(&label)?)
}

fn select_model(args: &CliArgs, ui: &UiConfig) -> anyhow::Result<String> {
    let model = args
        .model
        .clone()
        .or_else(|| ui.groq_model_options.first().cloned())
        .ok_or_else(|| anyhow!("no Groq model configured"))?;
    if !ui.groq_model_options.contains(&model) {
        bail!(
            "model {model} is not configured; choose one of: {}",
            ui.groq_model_options.join(", ")
        );
    }
    Ok(model)
}

fn select_usecase(args: &CliArgs, ui: &UiConfig) -> anyhow::Result<UseCase> {
    let label = args
        .usecase
        .clone()
        .or_else(|| ui.usecase_options.first().cloned())
        .ok_or_else(|| anyhow!("no use case configured"))?;
    let usecase = UseCase::from_str(&label)?;
    if !ui
        .usecase_options
        .iter()
        .any(|o| UseCase::from_str(o).ok() == Some(usecase))
    {
        bail!(
            "use case {usecase} is not configured; choose one of: {}",
            ui.usecase_options.join(", ")
        );
    }
    Ok(usecase)
}

fn warn_missing_keys(backend: LLMBackend, usecase: UseCase, credentials: &Credentials) {
    if credentials.llm_key().is_none() {
        eprintln!(
            "Warning: no {backend} API key. Pass --api-key or set {}.",
            backend.env_key()
        );
        log::warn!("no LLM API key configured");
    }
    if usecase.needs_search_key() && credentials.search_key().is_none() {
        eprintln!("Warning: no Tavily API key. Pass --search-api-key or set TAVILY_API_KEY.");
        log::warn!("no search API key configured");
    }
    if usecase.needs_search_key() && credentials.embedding_key().is_none() {
        log::warn!("no embedding API key; site retrieval will be unavailable");
    }
}
