//! fib command-line interface.

pub mod cli;
pub mod commands;
pub mod console;
