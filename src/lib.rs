//! folio: a terminal portfolio.
//!
//! Two self-contained pieces do the interesting work:
//! - [`loader`]: the PS2-style ring of trailing dots and the progress timer
//!   that ends the loading screen
//! - [`console`]: the easter-egg command terminal with history recall
//!
//! Everything else is configuration and ratatui presentation.

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod keys;
pub mod loader;
pub mod logging;
pub mod theme;
pub mod ui;

pub use error::{Error, Result};
