mod build;
mod parse;
mod prompt;

pub(crate) use build::run_build;
pub(crate) use parse::{parse_command, Command};
