pub mod check;
pub mod clean;
pub mod config;
pub mod generate;
pub mod hook;
pub mod show;

pub use check::handle_check;
pub use clean::handle_clean;
pub use config::{handle_config, ConfigAction};
pub use generate::{handle_generate, GenerateArgs};
pub use hook::handle_hook;
pub use show::{handle_show, ShowFormat};
