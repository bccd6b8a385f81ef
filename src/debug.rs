//! # Debugging and Logging Utilities
//!
//! Conditional logging and timing helpers shared by all three binaries.
//! Verbosity is gated by environment variables so that the library can be
//! embedded without forcing a logging framework on the caller, and by each
//! binary's own `--debug` flag, which simply sets the environment variable
//! for the duration of the process.

use std::time::Instant;

/// Checks if the general debug mode is active.
///
/// Debug output is enabled if the `N2T_DEBUG` environment variable is set
/// or if the binary was built with `debug_assertions` (the default for
/// `cargo build`).
pub fn is_debug_enabled() -> bool {
    std::env::var("N2T_DEBUG").is_ok() || cfg!(debug_assertions)
}

/// Checks if performance/verbose tracking mode is active.
///
/// Enabled via the `N2T_VERBOSE` environment variable.
pub fn is_perf_enabled() -> bool {
    std::env::var("N2T_VERBOSE").is_ok()
}

/// Sets the `N2T_DEBUG` environment variable for the current process,
/// called once from `main` when `--debug` is passed on the command line.
pub fn enable_debug() {
    // SAFETY: called once, single-threaded, before any other thread is spawned.
    unsafe { std::env::set_var("N2T_DEBUG", "1") };
}

/// Logs a message from the tokenizing/lexing phase, only if debug mode is active.
pub fn log_lexer(msg: &str) {
    if is_debug_enabled() {
        println!("🔍 LEXER: {}", msg);
    }
}

/// Logs a message from the parsing phase, only if debug mode is active.
pub fn log_parser(msg: &str) {
    if is_debug_enabled() {
        println!("🔍 PARSER: {}", msg);
    }
}

/// Logs a message from the code generation phase, only if debug mode is active.
pub fn log_codegen(msg: &str) {
    if is_debug_enabled() {
        println!("🔍 CODEGEN: {}", msg);
    }
}

/// Logs a general orchestration message, only if debug mode is active.
pub fn log_compiler(msg: &str) {
    if is_debug_enabled() {
        println!("🔍 COMPILER: {}", msg);
    }
}

/// A simple structure for timing the duration of a pipeline stage.
///
/// Usage: `let timer = PerfTimer::new("vm translate"); ... timer.finish();`
pub struct PerfTimer {
    start: Instant,
    label: String,
}

impl PerfTimer {
    /// Creates a new timer instance, capturing the current moment and, when
    /// the `timestamps` feature is enabled, a wall-clock banner.
    pub fn new(label: &str) -> Self {
        #[cfg(feature = "timestamps")]
        if is_debug_enabled() {
            println!(
                "⏱️  {} started at {}",
                label,
                chrono::Local::now().to_rfc3339()
            );
        }
        Self {
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    /// Stops the timer, calculates the elapsed duration, and prints the
    /// result if performance tracking (`is_perf_enabled`) is active.
    pub fn finish(self) {
        if is_perf_enabled() {
            let duration = self.start.elapsed();
            println!("⏱️  {}: {:?}", self.label, duration);
        }
    }
}
