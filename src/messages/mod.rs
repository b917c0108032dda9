pub mod app;

pub use app::{Action, AppCommand, AppEvent, Notice};
