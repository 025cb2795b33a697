mod cli;

use clap::Parser;
use cli::{Cli, Commands, ConfigArgs};
use pdfbatch::config::{Config, ConfigError};
use pdfbatch::pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = load_config(args)?;
            pipeline::run(&config).await?;
        }
        Commands::ShowConfig(args) => {
            let config = load_config(args)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(args: ConfigArgs) -> Result<Config, ConfigError> {
    match args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}
