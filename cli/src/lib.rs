//! Command-line front end for the youth council site backend.

pub mod cli;
pub mod commands;
pub mod utils;
