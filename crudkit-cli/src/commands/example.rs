//! `crudkit example`: emit a ready-made configuration for an entity.

use anyhow::{bail, Context, Result};
use console::style;
use crudkit::example::{example_config, Complexity};
use std::fs;
use std::path::PathBuf;

pub struct ExampleCommand {
    pub name: String,
    pub complexity: String,
    pub output: Option<PathBuf>,
}

impl ExampleCommand {
    pub fn execute(&self) -> Result<()> {
        let Some(complexity) = Complexity::parse(&self.complexity) else {
            bail!(
                "unknown complexity `{}` (expected simple, medium, or complex)",
                self.complexity
            );
        };

        let config = example_config(&self.name, complexity);
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize example configuration")?;

        match &self.output {
            Some(path) => {
                fs::write(path, format!("{json}\n"))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "{} example configuration for {} written to {}",
                    style("ok:").green().bold(),
                    style(&config.entity_name).bold(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
