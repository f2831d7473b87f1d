//! CLI viewer and controller for the Maku state-sync hub.
//!
//! A thin presentation layer: it only consumes `state` envelopes and only
//! produces `update` envelopes. All displayed state comes from hub
//! snapshots; nothing is mutated optimistically on the client side.

mod command;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
