//! Core library modules for care.
//!
//! - **Infrastructure**: configuration, data storage, messaging, persistence
//! - **Evaluation**: time-of-day phases, activity tracking, daily stats,
//!   user controls and the engine combining them
//! - **Presentation**: phrases, status line, notifications, report, tables
//! - **Watcher**: keyboard monitor and background process management

pub mod config;
pub mod controls;
pub mod daemon;
pub mod data_storage;
pub mod engine;
pub mod formatter;
pub mod holiday;
pub mod messages;
pub mod monitor;
pub mod phase;
pub mod phrases;
pub mod report;
pub mod stats;
pub mod store;
pub mod surface;
pub mod time_of_day;
pub mod tracker;
pub mod view;
