//! Configuration and result types for the CRUD generator
//!
//! The serde representation (camelCase keys, lowercase field types) is the
//! wire contract consumed from user-supplied JSON configurations and
//! produced in generation results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// The closed set of supported entity field types.
///
/// Type-conditional validation dispatches exhaustively over this enum, so a
/// new variant cannot be added without declaring its mandatory sub-config in
/// the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text
    Text,
    /// Integer or decimal number
    Number,
    /// Email address
    Email,
    /// Password (masked input)
    Password,
    /// Dropdown over a fixed option list
    Select,
    /// Multi-line text
    Textarea,
    /// Calendar date
    Date,
    /// True/false checkbox
    Boolean,
    /// File upload
    File,
    /// Reference to another entity, resolved via a search endpoint
    Relation,
}

impl FieldType {
    /// All supported field types, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Text,
        Self::Number,
        Self::Email,
        Self::Password,
        Self::Select,
        Self::Textarea,
        Self::Date,
        Self::Boolean,
        Self::File,
        Self::Relation,
    ];

    /// The TypeScript type generated code uses for values of this field.
    ///
    /// `relation` maps to `any`; the concrete type is supplied by the
    /// relation configuration in the rendered module.
    #[must_use]
    pub const fn ts_type(self) -> &'static str {
        match self {
            Self::Text | Self::Email | Self::Password | Self::Textarea | Self::Select
            | Self::File => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "Date",
            Self::Relation => "any",
        }
    }

    /// One-line description shown by the field-type catalog.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Text => "Single-line text",
            Self::Number => "Integer or decimal number",
            Self::Email => "Email address",
            Self::Password => "Password (masked while typing)",
            Self::Select => "Dropdown list over fixed options",
            Self::Textarea => "Long text (multiple lines)",
            Self::Date => "Date (calendar picker)",
            Self::Boolean => "True/false (checkbox)",
            Self::File => "File upload",
            Self::Relation => "Reference to another entity",
        }
    }

    /// The `validation` keys that are meaningful for this field type.
    #[must_use]
    pub const fn validation_keys(self) -> &'static [&'static str] {
        match self {
            Self::Text | Self::Password => &["min", "max", "pattern"],
            Self::Number | Self::Textarea => &["min", "max"],
            Self::Email => &["pattern"],
            Self::Select => &["options (required)"],
            Self::File => &["accept (required)"],
            Self::Date | Self::Boolean | Self::Relation => &[],
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::File => "file",
            Self::Relation => "relation",
        };
        f.write_str(name)
    }
}

/// Validation rules attached to a field. Which keys apply depends on the
/// field type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum value or length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum value or length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Allowed options for `select` fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Accepted MIME types for `file` fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

/// Configuration of a `relation` field: how the referenced entity is
/// searched and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRelation {
    /// Search endpoint for the referenced entity
    pub endpoint: String,
    /// Field of the referenced entity shown to the user
    pub display_field: String,
    /// Field of the referenced entity stored as the value
    pub value_field: String,
    /// Fields searched when the user types
    #[serde(default)]
    pub search_fields: Vec<String>,
    /// Whether multiple values can be selected
    #[serde(default)]
    pub multiple: bool,
    /// Whether all options are loaded up front
    #[serde(default)]
    pub preload: bool,
    /// Minimum typed characters before searching
    #[serde(default = "default_min_chars")]
    pub min_chars: u32,
    /// Name of the referenced entity
    #[serde(default)]
    pub relation_entity: String,
    /// Whether new referenced entities can be created inline
    #[serde(default)]
    pub allow_create: bool,
}

fn default_min_chars() -> u32 {
    2
}

/// One named, typed attribute of the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityField {
    /// Field identifier (lowerCamel)
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label
    pub label: String,
    /// Whether a value is mandatory
    #[serde(default)]
    pub required: bool,
    /// Type-dependent validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    /// Relation configuration, mandatory for `relation` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<FieldRelation>,
    /// Whether free-text search covers this field
    #[serde(default)]
    pub searchable: bool,
    /// Whether the list can be sorted by this field
    #[serde(default)]
    pub sortable: bool,
    /// Whether the list can be filtered by this field
    #[serde(default)]
    pub filterable: bool,
    /// Whether the field appears as a list column
    #[serde(default)]
    pub show_in_list: bool,
    /// Input placeholder text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// CRUD permission flags. At least one must be enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudPermissions {
    /// Allow creating records
    pub create: bool,
    /// Allow reading records
    pub read: bool,
    /// Allow updating records
    pub update: bool,
    /// Allow deleting records
    pub delete: bool,
}

impl CrudPermissions {
    /// Whether at least one permission is enabled.
    #[must_use]
    pub const fn any(self) -> bool {
        self.create || self.read || self.update || self.delete
    }
}

/// Complete configuration for one generation run. Immutable once validation
/// succeeds; each invocation owns its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Destination directory for the generated module
    pub target_path: String,
    /// Entity name, singular (PascalCase identifier)
    pub entity_name: String,
    /// Entity name, plural (PascalCase identifier, caller-supplied and
    /// authoritative over any naive pluralization)
    pub entity_name_plural: String,
    /// Ordered field definitions
    pub fields: Vec<EntityField>,
    /// Base API endpoint, `/api/...`
    pub api_endpoint: String,
    /// Per-field endpoint overrides for relation fields
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relation_endpoints: BTreeMap<String, String>,
    /// CRUD permission flags
    pub permissions: CrudPermissions,
}

/// Behavior switches for a generation run. All default to off.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Overwrite existing destination files (after a timestamped backup)
    pub overwrite: bool,
    /// Compute and report everything without touching the filesystem
    pub dry_run: bool,
    /// Emit debug-level progress logs
    pub verbose: bool,
    /// Skip configuration validation (the target-path probe still runs)
    pub skip_validation: bool,
}

/// Classification of a generated file by its destination subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// UI component
    Component,
    /// Page route
    Page,
    /// API route handler
    Api,
    /// Typed contract
    Type,
    /// Data hook
    Hook,
    /// Validation schema
    Validation,
    /// Anything else (documentation, config)
    Other,
}

impl FileKind {
    /// Classify a destination path by the subtree it lands in.
    #[must_use]
    pub fn classify(path: &Path) -> Self {
        let mut kind = Self::Other;
        for component in path.components() {
            kind = match component.as_os_str().to_str() {
                Some("components") => Self::Component,
                Some("pages") => Self::Page,
                Some("api") => Self::Api,
                Some("types") => Self::Type,
                Some("hooks") => Self::Hook,
                Some("validation") => Self::Validation,
                _ => continue,
            };
            break;
        }
        kind
    }
}

/// Metadata of one produced (or simulated) destination file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// Destination path
    pub path: String,
    /// Classification by destination subtree
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Human-readable provenance
    pub description: String,
}

/// Outcome of a full generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// True when no per-file or fatal errors occurred
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// Every produced, simulated, or already-present destination path
    pub files_created: Vec<String>,
    /// Per-file and fatal error messages
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Advisory warnings from validation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl GenerationResult {
    /// A failed result with a single message and error list.
    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            files_created: Vec::new(),
            errors,
            warnings: Vec::new(),
        }
    }
}

/// One field-scoped validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dotted path to the offending part of the configuration
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Stable machine code
    pub code: String,
}

impl ValidationError {
    /// Construct an error from its three parts.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Outcome of validating a configuration or a target path.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True when no errors were collected
    pub valid: bool,
    /// Every violation found, in one pass
    pub errors: Vec<ValidationError>,
    /// Advisory warnings; never affect `valid`
    pub warnings: Vec<String>,
}
