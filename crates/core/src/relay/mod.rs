//! The relay pipeline: download a blob, run it through the transcoder,
//! upload the result.
//!
//! [`RelayPipeline::run`] is the single entry point; everything it needs is
//! injected at construction. A run either ends in a [`RelaySummary`] or in a
//! [`RelayError`] that already knows its HTTP status class.

mod error;
mod pipeline;
mod types;
mod workspace;

pub use error::*;
pub use pipeline::*;
pub use types::*;
pub use workspace::*;
