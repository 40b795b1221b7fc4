//! Command-line front end for the TFCU procedure auditor.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
