//! PointerKit Application
//!
//! Native shell that opens a window and streams the enriched pointer samples
//! it receives to the log and, optionally, to stdout as JSON lines.

mod app;

pub use app::{App, AppConfig, AppError};
