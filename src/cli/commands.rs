//! CLI command handlers.

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::info;

use crate::cli::args::{HistoryAction, QrArgs};
use crate::config::AppConfig;
use crate::constants;
use crate::history::HistoryManager;
use crate::plugins::{builtin, PluginManager};
use crate::qr::{self, QrSettings};

/// Generate a QR code and return the process exit status.
pub fn handle_qr(settings: &QrSettings) -> u8 {
    qr::run(settings)
}

/// Resolve QR settings from the environment alone and generate the code.
///
/// Resolution failures are reported like generation failures.
pub fn handle_qr_from_env() -> u8 {
    match QrArgs::from_env() {
        Ok(args) => handle_qr(&QrSettings::from(args)),
        Err(err) => qr::report_failure(err),
    }
}

/// Load the built-in plugins that the configuration leaves enabled.
///
/// # Errors
///
/// Returns an error if a plugin's registration hook fails.
pub fn load_plugins(config: &AppConfig) -> Result<(PluginManager, Vec<&'static str>)> {
    let mut manager = PluginManager::new();
    let loaded = manager
        .load_plugins(&builtin::enabled(&config.disabled_plugins))
        .wrap_err("Failed to load plugins")?;
    Ok((manager, loaded))
}

/// Run `command` on `a` and `b`, record the result and persist the history.
///
/// # Errors
///
/// Fails on an unknown command, an operation error, or history I/O.
pub fn handle_calc(
    plugins: &PluginManager,
    history: &mut HistoryManager,
    command: &str,
    a: f64,
    b: f64,
) -> Result<f64> {
    let operation = plugins
        .get_operation(command)
        .ok_or_else(|| eyre!("{}{command}", constants::MSG_UNKNOWN_COMMAND))?;
    let result = operation(a, b).wrap_err_with(|| format!("{command} {a} {b} failed"))?;

    history.load_history().wrap_err("Failed to load history")?;
    history.add_record(command, result);
    history.save_history().wrap_err("Failed to save history")?;

    info!(
        command,
        a,
        b,
        result,
        history = %history.path().display(),
        "Recorded calculation"
    );
    Ok(result)
}

/// Apply a history action and return the lines to print.
///
/// # Errors
///
/// Fails if the history file cannot be read, written or removed.
pub fn handle_history(history: &mut HistoryManager, action: HistoryAction) -> Result<Vec<String>> {
    match action {
        HistoryAction::Show => {
            history.load_history().wrap_err("Failed to load history")?;
            if history.is_empty() {
                return Ok(vec![constants::MSG_HISTORY_EMPTY.to_string()]);
            }
            Ok(history
                .records()
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{:>4}  {:<12} {}", i + 1, r.operation, r.result))
                .collect())
        }
        HistoryAction::Clear => {
            history.clear_history();
            history.save_history().wrap_err("Failed to save history")?;
            Ok(vec![constants::MSG_HISTORY_CLEARED.to_string()])
        }
        HistoryAction::Reset => {
            history.reset().wrap_err("Failed to reset history")?;
            Ok(vec![constants::MSG_HISTORY_RESET.to_string()])
        }
    }
}

/// Describe loaded plugins and registered commands.
pub fn handle_plugins(plugins: &PluginManager, loaded: &[&str]) -> Vec<String> {
    let mut lines = vec![format!("Plugins: {}", loaded.join(", "))];
    lines.push(format!("Commands: {}", plugins.commands().join(", ")));
    lines
}
