//! Configuration-driven CRUD module scaffolding for Next.js applications.
//!
//! Two cooperating halves:
//!
//! - [`validator`] checks a declarative [`GeneratorConfig`] (entity, fields,
//!   endpoint, permissions) and reports every problem at once, with
//!   machine-readable codes and advisory warnings.
//! - [`CrudGenerator`] materializes a validated configuration through a
//!   handlebars template tree into components, pages, API routes, types,
//!   hooks, and validation schemas, plus a README for the module.
//!
//! A run never panics or returns `Err`: every outcome, including fatal
//! ones, is reported through [`GenerationResult`].
//!
//! # Examples
//!
//! ```
//! use crudkit::example::{example_config, Complexity};
//! use crudkit::validator;
//!
//! let config = example_config("invoice", Complexity::Medium);
//! let report = validator::validate(&config);
//! assert!(report.valid);
//! ```
//!
//! Generating against a template tree:
//!
//! ```no_run
//! use crudkit::{CrudGenerator, GeneratorOptions};
//! use crudkit::example::{example_config, Complexity};
//!
//! let generator = CrudGenerator::new("templates/crud");
//! let config = example_config("invoice", Complexity::Simple);
//! let result = generator.generate(&config, &GeneratorOptions::default());
//! assert!(result.success);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod example;
pub mod generator;
pub mod naming;
pub mod validator;

pub use config::{
    CrudPermissions, EntityField, FieldRelation, FieldType, FieldValidation, FileKind,
    GeneratedFile, GenerationResult, GeneratorConfig, GeneratorOptions, ValidationError,
    ValidationResult,
};
pub use context::TemplateContext;
pub use error::GeneratorError;
pub use generator::CrudGenerator;
