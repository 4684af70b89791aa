//! i18n-map library - command handlers shared by the binary and its tests

pub mod commands;
pub mod common;
pub mod context;
pub mod errors;

pub use common::GlobalOpts;
pub use errors::CliError;
pub use i18n_map_logger as logger;
