use std::path::Path;

use anyhow::Result;
use calboard_core::CalboardConfig;
use owo_colors::OwoColorize;

pub fn run(config_path: &Path, init: bool) -> Result<()> {
    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            CalboardConfig::create_default_config(config_path)?;
            println!("Created {}", config_path.display());
        }
    }

    let settings = CalboardConfig::load_from(config_path)?.agenda_config()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Timezone:   {}", settings.timezone.name());
    println!("  Window:     {} days", settings.window_days);
    println!("  Max events: {}", settings.max_events);

    Ok(())
}
