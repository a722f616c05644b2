use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use skinpack_builder::logging;

mod workflows;

fn usage() -> &'static str {
    "Usage:\n  skinpack-builder\n  skinpack-builder build [<name> [<version> [<texture_dir>]]]\n  skinpack-builder help\n\n\
     Anything not given on the command line is read from skinpack.toml in the\n\
     texture directory, or prompted for."
}

fn main() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match workflows::parse_command(&args)? {
        workflows::Command::Help => {
            println!("{}", usage());
            Ok(ExitCode::SUCCESS)
        }
        workflows::Command::Build(build_args) => {
            let _guard = logging::init(Path::new(logging::LOG_FILENAME))?;
            // Reported through the subscriber so it reaches the log file too.
            match workflows::run_build(build_args) {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(err) => {
                    tracing::error!("{err:#}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
