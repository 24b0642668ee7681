//! Terminal front end
//!
//! A line-oriented stand-in for the browser page: commands are read from any
//! `BufRead`, frames are written to any `Write`.

pub mod command;
pub mod terminal;

pub use command::{resolve_target, Command};
pub use terminal::{run_loop, TerminalPresenter};
