//! CLI command implementations

mod example;
mod field_types;
mod generate;
mod validate;

pub use example::ExampleCommand;
pub use field_types::FieldTypesCommand;
pub use generate::GenerateCommand;
pub use validate::ValidateCommand;
