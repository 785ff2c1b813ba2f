//! `crudkit validate`: check a configuration file and report every problem.

use super::generate::load_config;
use anyhow::{bail, Result};
use console::style;
use crudkit::validator;
use std::path::PathBuf;

pub struct ValidateCommand {
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(&self) -> Result<()> {
        let config = load_config(&self.config_path)?;
        let report = validator::validate(&config);

        if report.valid {
            println!(
                "{} {} is valid ({} fields)",
                style("ok:").green().bold(),
                self.config_path.display(),
                config.fields.len()
            );
        } else {
            println!(
                "{} {} problem(s) found in {}:",
                style("invalid:").red().bold(),
                report.errors.len(),
                self.config_path.display()
            );
            for error in &report.errors {
                println!(
                    "  {} {}: {} [{}]",
                    style("x").red(),
                    style(&error.field).bold(),
                    error.message,
                    error.code
                );
            }
        }

        for warning in &report.warnings {
            println!("{} {warning}", style("warning:").yellow().bold());
        }

        if !report.valid {
            bail!("configuration is invalid");
        }
        Ok(())
    }
}
