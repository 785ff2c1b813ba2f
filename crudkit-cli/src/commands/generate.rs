//! `crudkit generate`: run a full generation from a configuration file.

use anyhow::{bail, Context, Result};
use console::style;
use crudkit::{CrudGenerator, GeneratorConfig, GeneratorOptions};
use std::fs;
use std::path::PathBuf;

/// Template directory used when `--templates` is not given.
const DEFAULT_TEMPLATE_DIR: &str = "templates/crud";

pub struct GenerateCommand {
    pub config_path: PathBuf,
    pub templates: Option<PathBuf>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub skip_validation: bool,
    pub verbose: bool,
}

impl GenerateCommand {
    pub fn execute(&self) -> Result<()> {
        let config = load_config(&self.config_path)?;

        println!(
            "\n{} {} {}",
            style("Generating CRUD module for").cyan().bold(),
            style(&config.entity_name).green().bold(),
            if self.dry_run {
                style("(dry run)").yellow().bold()
            } else {
                style("...").cyan().bold()
            }
        );

        let template_root = self
            .templates
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let generator = CrudGenerator::new(template_root);

        let options = GeneratorOptions {
            overwrite: self.overwrite,
            dry_run: self.dry_run,
            verbose: self.verbose,
            skip_validation: self.skip_validation,
        };
        let result = generator.generate(&config, &options);

        for warning in &result.warnings {
            println!("{} {warning}", style("warning:").yellow().bold());
        }

        if !result.files_created.is_empty() {
            println!(
                "\n{} {} files:",
                if self.dry_run {
                    style("Would generate").cyan().bold()
                } else {
                    style("Generated").green().bold()
                },
                result.files_created.len()
            );
            for path in &result.files_created {
                println!("  {} {path}", style("+").green());
            }
        }

        for error in &result.errors {
            eprintln!("{} {error}", style("error:").red().bold());
        }

        if !result.success {
            bail!("{}", result.message);
        }

        println!("\n{}", style(&result.message).green().bold());

        if !self.dry_run {
            println!("\n{}", style("Next steps:").cyan().bold());
            println!("  1. Review the generated files in {}", config.target_path);
            println!("  2. Wire the pages into your app's navigation");
            println!("  3. Replace lib/db.ts with your real data access layer");
        }
        Ok(())
    }
}

/// Read and parse a JSON configuration file.
pub fn load_config(path: &PathBuf) -> Result<GeneratorConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}
