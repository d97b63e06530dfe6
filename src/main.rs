use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::debug;

use utilkit::cli::args::{Args, Commands, HistoryAction};
use utilkit::cli::commands;
use utilkit::config;
use utilkit::history::HistoryManager;
use utilkit::logging;
use utilkit::qr::QrSettings;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    let (app_config, source) = config::load().wrap_err("Failed to load configuration")?;
    logging::init(&app_config.log_level);
    debug!(?source, ?app_config, "Configuration loaded");

    let history_file = args
        .history_file
        .clone()
        .unwrap_or_else(|| app_config.history_file.clone());

    match args.command {
        None => Ok(ExitCode::from(commands::handle_qr_from_env())),
        Some(Commands::Qr(qr_args)) => {
            Ok(ExitCode::from(commands::handle_qr(&QrSettings::from(qr_args))))
        }
        Some(Commands::Calc { command, a, b }) => {
            let (plugins, _) = commands::load_plugins(&app_config)?;
            let mut history = HistoryManager::new(history_file);
            let result = commands::handle_calc(&plugins, &mut history, &command, a, b)?;
            println!("{result}");
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::History { action }) => {
            let mut history = HistoryManager::new(history_file);
            let action = action.unwrap_or(HistoryAction::Show);
            for line in commands::handle_history(&mut history, action)? {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Plugins) => {
            let (plugins, loaded) = commands::load_plugins(&app_config)?;
            for line in commands::handle_plugins(&plugins, &loaded) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
