//! CLI library components for the compensation benchmarking tool.

pub mod logging;
