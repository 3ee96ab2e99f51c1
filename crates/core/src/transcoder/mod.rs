//! Media transcoding via an external binary.
//!
//! The binary (ffmpeg by convention) is resolved from a fixed list of
//! locations at run time, the transform instruction is tokenized into argv,
//! and the process runs under a wall-clock timeout with stderr captured for
//! the failure report.

mod command;
mod config;
mod error;
mod resolver;
mod runner;

pub use command::{build_transcode_args, split_instruction};
pub use config::*;
pub use error::*;
pub use resolver::resolve_binary;
pub use runner::*;
