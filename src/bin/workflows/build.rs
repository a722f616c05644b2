use anyhow::{Context, Result};

use skinpack_builder::config::{load_pack_config, PartialRequest};
use skinpack_builder::pipeline::{run, PackOutcome, PackRequest};

use super::parse::BuildArgs;
use super::prompt::{prompt_name, prompt_version};

pub(crate) fn run_build(args: BuildArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let source_dir = args.source_dir.unwrap_or_else(|| cwd.clone());

    let cli = PartialRequest {
        name: args.name,
        version: args.version,
    };
    let known = match load_pack_config(&source_dir)? {
        Some(file_config) => file_config.merge(cli),
        None => cli,
    };

    let name = match known.name {
        Some(name) => name,
        None => prompt_name()?,
    };
    let version_input = match known.version {
        Some(version) => version,
        None => prompt_version()?,
    };

    let request = PackRequest {
        name,
        version_input,
        source_dir,
        output_dir: cwd,
    };
    let outcome = run(&request)
        .with_context(|| format!("building skin pack '{}'", request.name))?;
    print_summary(&request, &outcome);
    Ok(())
}

fn print_summary(request: &PackRequest, outcome: &PackOutcome) {
    println!();
    println!(
        "[skinpack:{}] {} skin(s), version {}",
        request.name, outcome.skin_count, outcome.version
    );
    if outcome.version_defaulted {
        println!(
            "[skinpack:{}] version '{}' was not x.y.z; used {}",
            request.name, request.version_input, outcome.version
        );
    }
    println!(
        "[skinpack:{}] wrote {} ({} entries, sha256 {})",
        request.name,
        outcome.archive_path.display(),
        outcome.entries_written,
        outcome.archive_sha256
    );
    if let Some(warning) = &outcome.cleanup_warning {
        println!(
            "[skinpack:{}] temporary directory left behind: {}",
            request.name, warning
        );
    }
}
