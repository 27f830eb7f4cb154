use crate::error::Result;
use crate::settings::{load_settings_or_default, save_settings, settings_path, shellexpand_path};

pub fn run(
    pandoc: &str,
    tool_dir: &str,
    signature: Option<&str>,
    title: Option<&str>,
    keep_markdown: bool,
) -> Result<()> {
    let mut settings = load_settings_or_default();
    settings.pandoc = shellexpand_path(pandoc);
    settings.tool_dir = shellexpand_path(tool_dir);
    if let Some(sig) = signature {
        settings.signature = sig.to_string();
    }
    if let Some(t) = title {
        settings.report_title = t.to_string();
    }
    settings.keep_markdown = keep_markdown;
    settings.validate()?;

    save_settings(&settings)?;
    println!("Saved settings to {}", settings_path().display());
    Ok(())
}
