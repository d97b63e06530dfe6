//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::constants;
use crate::qr::QrSettings;

/// utilkit - QR codes, calculation history and plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// History file (defaults to the configured one, then history.csv)
    #[arg(long, global = true, env = constants::ENV_HISTORY_FILE)]
    pub history_file: Option<PathBuf>,

    /// Subcommand to execute; generates a QR code when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a QR code image
    Qr(QrArgs),
    /// Run a plugin operation on two numbers and record the result
    Calc {
        /// Operation name (see `plugins`)
        command: String,
        /// Left operand
        #[arg(allow_negative_numbers = true)]
        a: f64,
        /// Right operand
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },
    /// Inspect or manage the calculation history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// List loaded plugins and their commands
    Plugins,
}

/// History subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// Print recorded calculations
    Show,
    /// Remove all records but keep the file
    Clear,
    /// Remove all records and delete the file
    Reset,
}

/// QR generation options, each backed by an environment variable
#[derive(ClapArgs, Debug, Clone)]
pub struct QrArgs {
    /// Data to encode
    #[arg(long, env = constants::ENV_QR_DATA_URL, default_value = constants::DEFAULT_QR_DATA_URL)]
    pub data: String,
    /// Output directory, created if missing
    #[arg(long, env = constants::ENV_QR_CODE_DIR, default_value = constants::DEFAULT_QR_CODE_DIR)]
    pub output_dir: String,
    /// Image file name
    #[arg(long, env = constants::ENV_QR_CODE_FILENAME, default_value = constants::DEFAULT_QR_CODE_FILENAME)]
    pub filename: String,
    /// Colour of dark modules
    #[arg(long, env = constants::ENV_FILL_COLOR, default_value = constants::DEFAULT_FILL_COLOR)]
    pub fill_color: String,
    /// Background colour
    #[arg(long, env = constants::ENV_BACK_COLOR, default_value = constants::DEFAULT_BACK_COLOR)]
    pub back_color: String,
}

impl QrArgs {
    /// Resolve options from the environment alone, as when no subcommand is given.
    ///
    /// # Errors
    ///
    /// Fails only if an environment value is not valid UTF-8.
    pub fn from_env() -> Result<Self, clap::Error> {
        #[derive(Parser)]
        struct EnvOnly {
            #[command(flatten)]
            qr: QrArgs,
        }
        EnvOnly::try_parse_from([constants::APP_NAME]).map(|parsed| parsed.qr)
    }
}

impl From<QrArgs> for QrSettings {
    fn from(args: QrArgs) -> Self {
        Self {
            data: args.data,
            output_dir: PathBuf::from(args.output_dir),
            filename: args.filename,
            fill_color: args.fill_color,
            back_color: args.back_color,
        }
    }
}
