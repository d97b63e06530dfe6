//! Application-wide constants and configuration values.
//!
//! This module defines the static configuration used throughout utilkit,
//! including environment variable names, defaults, file names and messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

// === QR Environment ===

/// Payload encoded into the QR code.
pub const ENV_QR_DATA_URL: &str = "QR_DATA_URL";
/// Directory the QR image is written to.
pub const ENV_QR_CODE_DIR: &str = "QR_CODE_DIR";
/// File name of the QR image.
pub const ENV_QR_CODE_FILENAME: &str = "QR_CODE_FILENAME";
/// Colour of dark modules.
pub const ENV_FILL_COLOR: &str = "FILL_COLOR";
/// Colour of light modules and the border.
pub const ENV_BACK_COLOR: &str = "BACK_COLOR";

// === QR Defaults ===

pub const DEFAULT_QR_DATA_URL: &str = "https://github.com/kaw393939";
pub const DEFAULT_QR_CODE_DIR: &str = "qr_codes";
pub const DEFAULT_QR_CODE_FILENAME: &str = "github_qr.png";
pub const DEFAULT_FILL_COLOR: &str = "black";
pub const DEFAULT_BACK_COLOR: &str = "white";

/// Side length of one QR module in pixels.
pub const QR_BOX_SIZE: u32 = 10;
/// Quiet zone around the symbol, in modules.
pub const QR_BORDER: u32 = 4;

// === History ===

/// Default history file, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";
/// Overrides the history file location.
pub const ENV_HISTORY_FILE: &str = "UTILKIT_HISTORY_FILE";

// === Configuration ===

/// Overrides the configuration directory.
pub const ENV_CONFIG_DIR: &str = "UTILKIT_CONFIG_DIR";
/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Default log level when neither config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// === Messages ===

pub const MSG_QR_SUCCESS: &str = "QR code generated successfully at ";
pub const MSG_QR_ERROR: &str = "Error generating QR code: ";
pub const MSG_PLUGIN_LOAD_ERROR: &str = "Error loading plugin ";
pub const MSG_HISTORY_EMPTY: &str = "No history recorded.";
pub const MSG_HISTORY_CLEARED: &str = "History cleared.";
pub const MSG_HISTORY_RESET: &str = "History reset.";
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command: ";
