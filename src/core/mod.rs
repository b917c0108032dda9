//! Background tasks that keep the store in sync and carry out user commands.

pub mod poller;
pub mod worker;

pub use poller::{PollerConfig, spawn_poller};
pub use worker::{WorkerConfig, spawn_command_worker};
