use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdfbatch")]
#[command(about = "Bulk PDF downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every document listed in the input file
    Run(ConfigArgs),
    /// Print the effective configuration as TOML
    ShowConfig(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to $PDFBATCH_CONFIG or config/pdfbatch.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
