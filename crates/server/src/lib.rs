//! HTTP server for the ferryman transcoding relay.
//!
//! Exposes the router, shared state, and server metrics as a library so
//! integration tests can drive the API in-process.

pub mod api;
pub mod metrics;
pub mod state;
