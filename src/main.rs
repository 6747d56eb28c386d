//! ClipStack CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clipstack::cli::{
    app::{load_merged_config, run_daemon, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    DaemonOptions,
};
use clipstack::domain::config::{AppConfig, PollInterval};
use clipstack::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        poll_interval: cli.interval.clone(),
        notify: if cli.notify { Some(true) } else { None },
        cue: if cli.silent { Some(false) } else { None },
        max_text_preview: cli.max_preview,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // A bad interval string must not silently become the default
    let poll_interval = match config.poll_interval.as_ref() {
        Some(s) => match s.parse::<PollInterval>() {
            Ok(interval) => interval,
            Err(e) => {
                presenter.error(&format!("Invalid interval: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => PollInterval::default(),
    };

    // Same bound `config set max_text_preview` enforces
    let max_text_preview = config.max_text_preview_or_default();
    if max_text_preview == 0 {
        presenter.error("Invalid max-preview: must be at least 1");
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    let options = DaemonOptions {
        poll_interval,
        notify: config.notify_or_default(),
        cue: config.cue_or_default(),
        max_text_preview,
    };

    run_daemon(options).await
}
