use crate::cli::ConfigAction;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;
use imgfetch::config::ConfigManager;

pub async fn handle_config(config_manager: &mut ConfigManager, action: ConfigAction) -> Result<()> {
    let term = Term::stdout();

    match action {
        ConfigAction::Show => {
            let content = std::fs::read_to_string(config_manager.config_file())?;
            term.write_line(&format!("{} Current configuration:", style("⚙").cyan()))?;
            term.write_line("")?;
            term.write_line(&content)?;
        }

        ConfigAction::Path => {
            term.write_line(&format!("{}", config_manager.config_file().display()))?;
        }

        ConfigAction::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Reset configuration to defaults?")
                    .default(false)
                    .interact()?;

            if confirmed {
                config_manager.reset()?;
                term.write_line(&format!(
                    "{} Configuration reset to defaults",
                    style("✅").green()
                ))?;
            } else {
                term.write_line("Aborted")?;
            }
        }
    }

    Ok(())
}
