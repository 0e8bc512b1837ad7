//! Command implementations.

pub mod generate;
