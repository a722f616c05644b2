use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};

pub(crate) fn prompt_name() -> Result<String> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the skin pack name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("the name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("reading skin pack name")?;
    Ok(name.trim().to_string())
}

/// Empty or malformed input is accepted here; it falls back to 1.0.0 later.
pub(crate) fn prompt_version() -> Result<String> {
    let version: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the version number (format: x.y.z, e.g., 1.0.0)")
        .allow_empty(true)
        .interact_text()
        .context("reading version number")?;
    Ok(version.trim().to_string())
}
