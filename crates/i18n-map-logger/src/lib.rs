//! Operator-facing output for the i18n-map CLI
//!
//! Messages go to stderr according to the configured verbosity and, when a
//! log file was given at init, every message is appended to it with a
//! timestamp regardless of verbosity. With console output disabled only
//! errors still reach stderr.

use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
static VERBOSITY: Mutex<u8> = Mutex::new(0);
static NO_STDOUT: Mutex<bool> = Mutex::new(false);

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Set the verbosity level without touching the log file
pub fn set_verbosity(verbosity: u8) {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }
}

/// Get whether console output other than errors is disabled
pub fn get_no_stdout() -> bool {
    NO_STDOUT.lock().ok().map(|v| *v).unwrap_or(false)
}

/// Set whether console output other than errors is disabled
pub fn set_no_stdout(disabled: bool) {
    if let Ok(mut v) = NO_STDOUT.lock() {
        *v = disabled;
    }
}

/// Initialize the logger
///
/// 0 = warnings only, 1 = info/debug (-v), 2 = trace steps (-vv).
/// The log file, if any, is truncated so it only holds the current run.
pub fn init_with_verbosity(
    verbosity: u8,
    no_stdout: bool,
    log_file: Option<&Path>,
) -> Result<(), String> {
    set_verbosity(verbosity);
    set_no_stdout(no_stdout);

    let Some(log_file) = log_file else {
        return Ok(());
    };

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    if log_file.exists() {
        fs::remove_file(log_file).map_err(|e| format!("Failed to truncate log file: {}", e))?;
    }

    let mut guard = LOG_FILE
        .lock()
        .map_err(|_| "Logger state is poisoned".to_string())?;
    *guard = Some(log_file.to_path_buf());

    Ok(())
}

/// Format a single log-file line
pub fn format_log_line(timestamp: &str, level: &str, message: &str) -> String {
    format!("[{}] {} {}", timestamp, level, message)
}

fn write_to_log(level: &str, message: &str) {
    let Ok(guard) = LOG_FILE.lock() else {
        return;
    };
    let Some(ref log_path) = *guard else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let _ = writeln!(file, "{}", format_log_line(&timestamp, level, message));
    }
}

fn console(min_verbosity: u8, line: &str) {
    if get_no_stdout() || get_verbosity() < min_verbosity {
        return;
    }
    eprintln!("{}", line);
}

/// Log an informational message (console at -v, always to file)
pub fn info(message: &str) {
    write_to_log("INFO", message);
    console(1, message);
}

/// Log a debug message (console at -v, always to file)
pub fn debug(message: &str) {
    write_to_log("DEBUG", message);
    console(1, &format!("{} {}", "DEBUG:".blue().bold(), message));
}

/// Log a warning (shown unless console output is disabled)
pub fn warn(message: &str) {
    write_to_log("WARN", message);
    console(0, &format!("{} {}", "warning:".yellow().bold(), message));
}

/// Log an error (always shown, even with console output disabled)
pub fn error(message: &str) {
    write_to_log("ERROR", message);
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message
pub fn success(message: &str) {
    write_to_log("SUCCESS", message);
    let check = "\u{2714}".green().bold();
    console(0, &format!("{} {}", check, message));
}

/// Log a step message (console at -vv only)
pub fn step(message: &str) {
    write_to_log("STEP", message);
    console(2, &format!("TRACE: {}", message));
}

/// Get the log file path, if one was configured
pub fn get_log_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}
