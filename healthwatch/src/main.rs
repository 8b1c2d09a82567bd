//! healthwatch Entry Point

use clap::Parser;
use healthwatch::cli::{Cli, Commands};
use healthwatch::config::ServerConfig;
use healthwatch::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Monitor(args)) => healthwatch::cli::monitor::execute(&args).await,
        Some(Commands::Clean(args)) => {
            init_console_logging();
            healthwatch::cli::clean::execute(&args)
        }
        Some(Commands::Serve(args)) => {
            init_console_logging();
            healthwatch::cli::serve::execute(&args.to_config()).await
        }
        None => {
            // No subcommand - default to serve
            init_console_logging();
            healthwatch::cli::serve::execute(&ServerConfig::from_env()).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_console_logging() {
    if let Err(e) = logging::init(None) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
