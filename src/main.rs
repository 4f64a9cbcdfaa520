use clap::Parser;
use std::path::PathBuf;
use vertical_study_lib::config::AiConfig;
use vertical_study_lib::server::{self, ServerAppState};

/// Vertical Study - differential diagnosis study tables with AI research
#[derive(Parser, Debug)]
#[command(name = "vertical-study")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to bind the server to
    #[arg(long, default_value = "5001")]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Path to a TOML config file (defaults to ~/.vertical-study/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// AI service API key (or set VERTICAL_STUDY_API_KEY / GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match AiConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if config.api_key.is_none() {
        log::warn!("No AI API key configured; research requests will fail until one is set");
    }

    let state = match ServerAppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(async {
        if let Err(e) = server::run_server(cli.port, &cli.bind, state).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    });
}
