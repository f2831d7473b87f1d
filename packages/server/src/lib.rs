//! Maku state-sync hub library.
//!
//! This library implements the server side of a presentation sync system: a
//! single authoritative room state (current slide, active sound cue) that
//! any connected client can patch and that every connected client observes
//! as full snapshots in real time.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
