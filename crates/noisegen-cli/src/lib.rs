//! noisegen CLI library.
//!
//! Argument definitions and the generate command behind the `noisegen`
//! binary.

pub mod cli_args;
pub mod commands;
