//! Shared library for the Maku presentation sync application.
//!
//! Holds everything the server and client crates have in common: the wire
//! protocol (envelopes, room state, patches), time utilities, and logging
//! setup.

pub mod logger;
pub mod protocol;
pub mod time;
