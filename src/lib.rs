pub mod config;
pub mod flags;
pub mod memory;
pub mod run_wrapper;
pub mod trace;

pub mod error;
