//! Logging utilities with colored output and an append-only audit file.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - `AuditLog` for stage progress that must survive across runs
//!
//! # Example
//!
//! ```ignore
//! log!("render"; "rendering {} routes", count);
//!
//! let audit = AuditLog::open(&config.paths.log)?;
//! audit.record("finalize", "wrote dist/.prerender/template.html");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write, stdout},
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::utils::date::DateTimeUtc;

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "finalize" => prefix.bright_blue().bold().to_string(),
        "render" => prefix.bright_cyan().bold().to_string(),
        "validate" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Audit Log (append-only file)
// ============================================================================

/// Append-only log file mirroring a stage's console output.
///
/// Each line is `[timestamp] [module] message`. The file is opened in append
/// mode, so repeated runs accumulate history instead of overwriting it.
pub struct AuditLog {
    file: Mutex<File>,
}

impl AuditLog {
    /// Open (or create) the log file, creating parent directories as needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Print to the console and append to the file.
    pub fn record(&self, module: &str, message: &str) {
        log(module, message);
        self.append(module, message);
    }

    /// Append a line to the file only.
    ///
    /// Write failures are swallowed: losing an audit line must never fail a build.
    pub fn append(&self, module: &str, message: &str) {
        let stamp = DateTimeUtc::now().to_rfc3339();
        let mut file = self.file.lock();
        writeln!(file, "[{stamp}] [{module}] {message}").ok();
        file.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
