mod commands;

use clap::Parser;
use commands::{Cli, handle_command};
use image_priority_vote::config::Settings;
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    info!("Using base URL {}", settings.base_url);

    match handle_command(&settings, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
