//! Structured error types.
//!
//! `AppError` covers startup plumbing; `Failure` is the typed outcome of a single
//! automation round-trip and never escapes past a fetcher or issuer.

mod app;
mod failure;

pub use app::{AppError, SettingsError};
pub use failure::{Failure, PERMISSION_HINT};
