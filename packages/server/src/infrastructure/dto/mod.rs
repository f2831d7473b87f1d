//! DTOs for the outer surfaces.
//!
//! The WebSocket wire types live in `maku-shared::protocol` because client
//! and server exchange them verbatim; only the HTTP read-model DTOs are
//! server-local.

pub mod http;
