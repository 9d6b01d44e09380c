//! Console output and result files
//!
//! Console text goes through an [`OutputFormatter`] (plain or colored); the
//! per-test-case CSV files are written by the [`csv`] submodule.

pub mod csv;
mod colored;
mod formatter;

pub use colored::{ColoredFormatter, PerformanceLevel};
pub use formatter::{OutputFormatter, PlainFormatter, MESSAGE_PREVIEW_CHARS, RULE_WIDTH};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Colored output when enabled and the terminal allows it
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color && ColoredFormatter::supports_color() {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}
