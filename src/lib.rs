//! Terminal dashboard that mirrors and controls Apple Music through `osascript`.
//!
//! A background poller keeps a shared [`app::PlaybackState`] in sync with the player,
//! a command worker executes user actions, and the TUI renders the store every tick.

pub mod app;
pub mod automation;
pub mod core;
pub mod domain;
pub mod error;
pub mod features;
pub mod logging;
pub mod messages;
pub mod settings;
pub mod ui;
