//! CalcOf library: application logic behind the `calcof` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
