//! utilkit - a small command-line toolkit.
//!
//! Three independent utilities share this crate:
//!
//! - [`qr`] renders a QR code PNG from environment-driven settings.
//! - [`history`] keeps an ordered `(operation, result)` table persisted as CSV.
//! - [`plugins`] is an explicit registry that plugins populate with commands
//!   and operations at startup.
//!
//! State is owned by the caller and passed explicitly; nothing is global.

pub mod cli;
pub mod config;
pub mod constants;
pub mod history;
pub mod logging;
pub mod plugins;
pub mod qr;
