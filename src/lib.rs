//! Frisian Progress - learner progress for a Frisian course for Dutch speakers
//!
//! Turns learning activity into game progress: lifetime XP is mapped to a
//! level on a progressive curve, daily practice builds a streak, and learner
//! totals unlock achievements from a fixed catalog.
//!
//! ## Layers
//!
//! 1. **Pure core** ([`progress`]): leveling, streak and achievement functions.
//!    No I/O and no shared state, safe to call from any thread.
//!
//! 2. **Store** ([`progress::ProgressManager`]): a local SQLite database that
//!    feeds stored state through the core and writes the results back in a
//!    single transaction.

pub mod config;
pub mod error;
pub mod progress;

pub use error::ProgressError;
