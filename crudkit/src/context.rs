//! Render context construction
//!
//! A [`TemplateContext`] is built fresh per generation run from a validated
//! configuration and never mutated afterwards. The serialized key names
//! (`ENTITY_NAME`, `FIELDS`, ...) are the vocabulary template authors write
//! against.

use crate::config::{CrudPermissions, EntityField, GeneratorConfig};
use crate::naming;
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat, render-ready view of a validated configuration.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// Entity name, PascalCase
    #[serde(rename = "ENTITY_NAME")]
    pub entity_name: String,
    /// Entity name with the first character lowercased
    #[serde(rename = "ENTITY_NAME_LOWER")]
    pub entity_name_lower: String,
    /// Entity name, fully uppercased
    #[serde(rename = "ENTITY_NAME_UPPER")]
    pub entity_name_upper: String,
    /// Plural entity name, PascalCase
    #[serde(rename = "ENTITY_NAME_PLURAL")]
    pub entity_name_plural: String,
    /// Plural entity name with the first character lowercased
    #[serde(rename = "ENTITY_NAME_PLURAL_LOWER")]
    pub entity_name_plural_lower: String,
    /// Base API endpoint, copied verbatim
    #[serde(rename = "API_ENDPOINT")]
    pub api_endpoint: String,
    /// Field definitions, copied verbatim
    #[serde(rename = "FIELDS")]
    pub fields: Vec<EntityField>,
    /// Permission flags, copied verbatim
    #[serde(rename = "PERMISSIONS")]
    pub permissions: CrudPermissions,
    /// Relation endpoint overrides, defaulted to empty
    #[serde(rename = "RELATION_ENDPOINTS")]
    pub relation_endpoints: BTreeMap<String, String>,
    /// Generation timestamp, RFC 3339
    #[serde(rename = "TIMESTAMP")]
    pub timestamp: String,
    /// Generator version
    #[serde(rename = "VERSION")]
    pub version: String,
}

impl TemplateContext {
    /// Derive the render context from a validated configuration.
    ///
    /// Pure apart from the timestamp; no conditional logic beyond
    /// defaulting the relation endpoint map.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let entity_name = naming::pascal_case(&config.entity_name);
        let entity_name_plural = naming::pascal_case(&config.entity_name_plural);

        Self {
            entity_name_lower: naming::uncapitalize(&entity_name),
            entity_name_upper: entity_name.to_uppercase(),
            entity_name_plural_lower: naming::uncapitalize(&entity_name_plural),
            entity_name,
            entity_name_plural,
            api_endpoint: config.api_endpoint.clone(),
            fields: config.fields.clone(),
            permissions: config.permissions,
            relation_endpoints: config.relation_endpoints.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
