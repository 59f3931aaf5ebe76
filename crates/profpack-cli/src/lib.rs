//! Library components of the profpack CLI.

pub mod logging;
pub mod pipeline;
