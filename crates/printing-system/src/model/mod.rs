//! Plain data produced by a simulation run.

pub mod report;

pub use report::*;
