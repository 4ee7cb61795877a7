use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use console::{Term, style};
use imgfetch::config::Config;
use std::fs;
use std::path::PathBuf;

pub async fn handle_list(config: &Config, output_dir: Option<&str>, long: bool) -> Result<()> {
    let term = Term::stdout();
    let dir = PathBuf::from(output_dir.unwrap_or(&config.general.output_dir));

    if !dir.exists() {
        term.write_line(&format!(
            "{} No images fetched yet ({} does not exist)",
            style("ℹ").cyan(),
            dir.display()
        ))?;
        return Ok(());
    }

    let mut entries = Vec::new();
    for entry in
        fs::read_dir(&dir).with_context(|| format!("Failed to read directory: {:?}", dir))?
    {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        entries.push((entry.file_name().to_string_lossy().to_string(), metadata));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    if entries.is_empty() {
        term.write_line(&format!(
            "{} No images in {}",
            style("ℹ").cyan(),
            dir.display()
        ))?;
        return Ok(());
    }

    term.write_line(&format!(
        "{} Images in {}:",
        style("📁").cyan(),
        style(dir.display()).cyan()
    ))?;

    let mut total_bytes = 0u64;
    for (name, metadata) in &entries {
        total_bytes += metadata.len();
        if long {
            let modified = metadata
                .modified()
                .map(DateTime::<Local>::from)
                .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| "-".to_string());
            term.write_line(&format!(
                "   {:>10}  {}  {}",
                format_size(metadata.len()),
                modified,
                name
            ))?;
        } else {
            term.write_line(&format!("   {:>10}  {}", format_size(metadata.len()), name))?;
        }
    }

    term.write_line(&format!(
        "\n   {} files, {} total",
        entries.len(),
        format_size(total_bytes)
    ))?;

    Ok(())
}

/// Human-readable size, binary units.
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
