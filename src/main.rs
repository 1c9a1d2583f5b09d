use clap::Parser;
use colored::Colorize;

use linkdash::cli::Cli;
use linkdash::config::init_config;
use linkdash::interfaces::cli::run_cli_command;
use linkdash::system::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = init_config(cli.config.as_deref());
    let guard = init_logging(&config.logging);

    let result = run_cli_command(cli.command, config).await;

    // flush pending log lines before a possible exit
    drop(guard);

    if let Err(e) = result {
        eprintln!("{} {}", "✗".bold().red(), e.format_colored());
        std::process::exit(1);
    }
}
