//! # care - a work-day companion
//!
//! Watches keyboard activity and, depending on the time of day, shows
//! status texts and notifications: greetings in the morning, lunch nags,
//! an end-of-day countdown, "go home" once work is over and warnings late
//! at night. Weekend edits are undone unless coding was allowed for the
//! day, long sessions trigger a break reminder, and a small rolling log of
//! daily active time and breaks is kept.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use care::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
