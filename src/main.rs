// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use context_links::{
    api::{start_server, AppState, LoginRedirects},
    auth::GoogleIdentityProvider,
    chat::{ChatOrchestrator, OpenAiCompatibleClient, PromptTemplate, TpmMessageClassifier},
    config::AppConfig,
    content::HttpLinkFetcher,
    context::ContextBuilder,
    store::InMemoryStore,
    version,
};
use std::{env, path::PathBuf, sync::Arc};

/// Context Links API server
#[derive(Parser, Debug)]
#[command(name = "context-links")]
#[command(version)]
#[command(about = "Save links, build contexts from their pages and chat about them", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "API_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "API_PORT")]
    port: Option<u16>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

/// Find `--env-file <path>` or `--env-file=<path>` ahead of clap
fn env_file_arg(args: impl IntoIterator<Item = String>) -> Option<PathBuf> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--env-file" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--env-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files must be loaded before clap reads env fallbacks
    let env_file = env_file_arg(env::args());
    match env_file {
        Some(path) => {
            dotenv::from_path(&path)
                .map_err(|e| anyhow!("cannot load env file {}: {}", path.display(), e))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", version::get_version_string());
    if let Some(path) = &cli.env_file {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let store = Arc::new(InMemoryStore::new());
    let fetcher = Arc::new(HttpLinkFetcher::new(config.content.clone())?);
    let context_builder = Arc::new(ContextBuilder::new(
        store.clone(),
        fetcher,
        &config.content,
    ));

    let model = Arc::new(OpenAiCompatibleClient::new(&config.chat)?);
    tracing::info!("Chat model: {}", model.model());
    let chat = Arc::new(ChatOrchestrator::new(
        store.clone(),
        model,
        Arc::new(TpmMessageClassifier),
        context_builder.clone(),
        PromptTemplate::from_config(&config.chat),
        config.chat.request_timeout(),
    ));

    let identity = Arc::new(GoogleIdentityProvider::new(config.oauth.clone())?);

    let state = AppState {
        store,
        context_builder,
        chat,
        identity,
        redirects: LoginRedirects {
            success: config.oauth.login_redirect_path.clone(),
            failure: config.oauth.login_error_redirect_path.clone(),
        },
    };

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow!(e))?;

    tokio::select! {
        result = start_server(state, addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
