use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use smolder::config::Config;
use smolder::pipeline::TrendingPipeline;
use smolder::reddit::RedditClient;
use smolder::topics::oracle::OpenAiOracle;
use smolder::topics::Categorizer;
use smolder::web;

/// Smolder: ranked, scored trending topics from live Reddit posts.
#[derive(Parser)]
#[command(name = "smolder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the trend API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smolder=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;

            let reddit = RedditClient::new(&config.reddit_base_url, config.request_timeout)?;

            let oracle = if config.oracle_enabled() {
                info!(model = %config.openai_model, "categorization oracle enabled");
                Some(Arc::new(OpenAiOracle::new(
                    config.openai_api_key.clone(),
                    &config.openai_base_url,
                    config.openai_model.clone(),
                    config.request_timeout,
                )?) as Arc<dyn smolder::topics::traits::CategoryOracle>)
            } else {
                info!("OPENAI_API_KEY not set — using keyword clustering only");
                None
            };

            let pipeline = Arc::new(TrendingPipeline::new(reddit, Categorizer::new(oracle)));
            web::run_server(pipeline, port, &bind).await?;
        }
    }

    Ok(())
}
