//! deferlog CLI
//!
//! Command-line front end for the deferred logging facade

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "deferlog")]
#[command(about = "deferlog - deferred-initialization logging facade", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log through several loggers before and after sink initialization
    Demo(commands::demo::DemoArgs),
    /// Validate a TOML configuration and print the resolved settings
    CheckConfig(commands::check_config::CheckConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args).await,
        Commands::CheckConfig(args) => commands::check_config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
