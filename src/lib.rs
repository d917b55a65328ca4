//! On-call rotation report engine.
//!
//! This crate turns on-call schedule coverage into billable hours and
//! compensation per user. Each coverage period is sampled at a fixed step,
//! every sample is classified as a weekday, weekend or bank holiday hour
//! (honouring the daily rotation boundary and excluded office hours), and
//! the totals are priced from configured daily rates.
//!
//! # Example
//!
//! ```no_run
//! use oncall_report::calculation::generate_report;
//! use oncall_report::config::ConfigLoader;
//! use oncall_report::models::ReportWindow;
//! use oncall_report::render::render_console;
//!
//! let config = ConfigLoader::load("./config/example")?;
//! let window = ReportWindow::for_month(2024, 3, config.rotation_boundary_hour())?;
//! let report = generate_report(window, &[], &config)?;
//! println!("{}", render_console(&report));
//! # Ok::<(), oncall_report::error::ReportError>(())
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
