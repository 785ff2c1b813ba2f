//! `crudkit field-types`: print the supported field type catalog.

use console::style;
use crudkit::FieldType;

pub struct FieldTypesCommand;

impl FieldTypesCommand {
    pub fn execute(self) {
        println!("\n{}\n", style("Supported field types").cyan().bold());

        for field_type in FieldType::ALL {
            let keys = field_type.validation_keys();
            let validation = if keys.is_empty() {
                String::from("none")
            } else {
                keys.join(", ")
            };
            println!(
                "  {} {} {}",
                style(format!("{:<10}", field_type.to_string())).green().bold(),
                style(format!("{:<8}", field_type.ts_type())).dim(),
                field_type.description()
            );
            println!("             validation: {validation}");
        }
        println!();
    }
}
