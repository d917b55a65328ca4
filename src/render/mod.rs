//! Report rendering.
//!
//! The calculation core keeps full decimal precision; renderers round for
//! display only.

mod console;

pub use console::{ConsoleReport, format_amount, render_console};
