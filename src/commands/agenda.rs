use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use calboard_core::{AgendaConfig, build_agenda};
use chrono::{DateTime, Utc};

use crate::render::Render;

pub fn run(file: Option<&Path>, config: &AgendaConfig, now: DateTime<Utc>, json: bool) -> Result<()> {
    let content = read_input(file)?;
    log::info!(
        "Read {} bytes of calendar data, timezone {}",
        content.len(),
        config.timezone.name()
    );
    let groups = build_agenda(&content, config, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    let rendered: Vec<String> = groups.iter().map(|g| g.render(config.timezone)).collect();
    println!("{}", rendered.join("\n\n"));

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Could not read calendar from stdin")?;
            Ok(content)
        }
    }
}
