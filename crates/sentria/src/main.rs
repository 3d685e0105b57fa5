// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentria - crisis-management report service.
//!
//! This is the binary entry point for the Sentria server.

use clap::{Parser, Subcommand};

mod serve;

/// Sentria - crisis-management report service.
#[derive(Parser, Debug)]
#[command(name = "sentria", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Sentria HTTP server.
    Serve,
    /// Print the effective configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match sentria_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sentria_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("sentria serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(config);
        }
        None => {
            println!("sentria: use --help for available commands");
        }
    }
}

/// Prints the effective configuration as TOML with secrets redacted.
fn print_config(mut config: sentria_config::SentriaConfig) {
    if config.session.signing_secret.is_some() {
        config.session.signing_secret = Some("[redacted]".to_string());
    }
    if config.openai.api_key.is_some() {
        config.openai.api_key = Some("[redacted]".to_string());
    }
    match toml::to_string_pretty(&config) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("sentria config: could not render configuration: {e}"),
    }
}
