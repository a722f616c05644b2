use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Build(BuildArgs),
}

/// Positional `build` arguments; `None` means "config file or prompt".
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildArgs {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) source_dir: Option<PathBuf>,
}

pub(crate) fn parse_command(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Build(BuildArgs::default())),
        [help] if matches!(help.as_str(), "help" | "--help" | "-h") => Ok(Command::Help),
        [build, rest @ ..] if build == "build" => parse_build_args(rest).map(Command::Build),
        _ => bail!(crate::usage()),
    }
}

pub(crate) fn parse_build_args(args: &[String]) -> Result<BuildArgs> {
    let mut parsed = BuildArgs::default();
    match args {
        [] => {}
        [name] => {
            parsed.name = non_blank(name);
        }
        [name, version] => {
            parsed.name = non_blank(name);
            parsed.version = non_blank(version);
        }
        [name, version, source_dir] => {
            parsed.name = non_blank(name);
            parsed.version = non_blank(version);
            parsed.source_dir = Some(PathBuf::from(source_dir));
        }
        _ => bail!(
            "unsupported positional arguments for `build`; expected `[name] [version] [texture_dir]`, max 3 args"
        ),
    }
    Ok(parsed)
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
