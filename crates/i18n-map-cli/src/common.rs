//! Common types and utilities shared across commands

use clap::Parser;
use std::path::PathBuf;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only show errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for package details, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        short = 'd',
        long,
        global = true,
        default_value = ".",
        help = "Composer project directory"
    )]
    pub project_dir: PathBuf,

    #[arg(
        long,
        global = true,
        env = "I18N_MAP_LOG_FILE",
        help = "Also append all messages to this file"
    )]
    pub log_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: warnings only (`-q` also silences warnings)
    /// - 1: package details (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_overrides_verbose() {
        let opts = GlobalOpts::parse_from(["i18n-map", "-vv", "-q"]);
        assert_eq!(opts.verbosity_level(), 0);

        let opts = GlobalOpts::parse_from(["i18n-map", "-vv"]);
        assert_eq!(opts.verbosity_level(), 2);
        assert_eq!(opts.project_dir, PathBuf::from("."));
    }
}
