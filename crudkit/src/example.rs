//! Ready-made example configurations
//!
//! Valid starting points at three sizes, used by the CLI `example` command
//! and handy as test fixtures. Every configuration produced here passes
//! validation unchanged.

use crate::config::{
    CrudPermissions, EntityField, FieldRelation, FieldType, FieldValidation, GeneratorConfig,
};
use crate::naming;
use std::collections::BTreeMap;

/// How much surface the example configuration should demonstrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complexity {
    /// Text, textarea, and boolean fields only
    Simple,
    /// Adds typed validation: email, number ranges, select options, dates
    #[default]
    Medium,
    /// Adds relation and file fields with full nested configuration
    Complex,
}

impl Complexity {
    /// All complexity levels, in ascending order.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Medium, Self::Complex];

    /// Parse a complexity name as the CLI spells it.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "medium" => Some(Self::Medium),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

/// Build an example configuration for `entity_name` at the given size.
///
/// The entity name is normalized to PascalCase and pluralized; the API
/// endpoint is derived from the kebab-cased plural.
///
/// # Examples
///
/// ```
/// use crudkit::example::{example_config, Complexity};
/// use crudkit::validator;
///
/// let config = example_config("producto", Complexity::Medium);
/// assert_eq!(config.entity_name, "Producto");
/// assert_eq!(config.api_endpoint, "/api/productos");
/// assert!(validator::validate(&config).valid);
/// ```
#[must_use]
pub fn example_config(entity_name: &str, complexity: Complexity) -> GeneratorConfig {
    let entity_name = naming::pascal_case(entity_name);
    let entity_name_plural = naming::pluralize(&entity_name);
    let endpoint_segment = naming::kebab_case(&entity_name_plural);

    let mut fields = vec![
        EntityField {
            name: "name".to_string(),
            field_type: FieldType::Text,
            label: "Name".to_string(),
            required: true,
            validation: Some(FieldValidation {
                min: Some(2.0),
                max: Some(100.0),
                pattern: None,
                options: None,
                accept: None,
            }),
            relation: None,
            searchable: true,
            sortable: true,
            filterable: false,
            show_in_list: true,
            placeholder: Some(format!("Enter {} name", naming::uncapitalize(&entity_name))),
        },
        EntityField {
            name: "description".to_string(),
            field_type: FieldType::Textarea,
            label: "Description".to_string(),
            required: false,
            validation: Some(FieldValidation {
                min: None,
                max: Some(500.0),
                pattern: None,
                options: None,
                accept: None,
            }),
            relation: None,
            searchable: true,
            sortable: false,
            filterable: false,
            show_in_list: false,
            placeholder: None,
        },
        EntityField {
            name: "active".to_string(),
            field_type: FieldType::Boolean,
            label: "Active".to_string(),
            required: false,
            validation: None,
            relation: None,
            searchable: false,
            sortable: true,
            filterable: true,
            show_in_list: true,
            placeholder: None,
        },
    ];

    if complexity != Complexity::Simple {
        fields.push(EntityField {
            name: "email".to_string(),
            field_type: FieldType::Email,
            label: "Email".to_string(),
            required: true,
            validation: None,
            relation: None,
            searchable: true,
            sortable: false,
            filterable: false,
            show_in_list: true,
            placeholder: Some("name@example.com".to_string()),
        });
        fields.push(EntityField {
            name: "price".to_string(),
            field_type: FieldType::Number,
            label: "Price".to_string(),
            required: true,
            validation: Some(FieldValidation {
                min: Some(0.0),
                max: Some(99_999.0),
                pattern: None,
                options: None,
                accept: None,
            }),
            relation: None,
            searchable: false,
            sortable: true,
            filterable: true,
            show_in_list: true,
            placeholder: None,
        });
        fields.push(EntityField {
            name: "status".to_string(),
            field_type: FieldType::Select,
            label: "Status".to_string(),
            required: true,
            validation: Some(FieldValidation {
                min: None,
                max: None,
                pattern: None,
                options: Some(vec![
                    "draft".to_string(),
                    "published".to_string(),
                    "archived".to_string(),
                ]),
                accept: None,
            }),
            relation: None,
            searchable: false,
            sortable: false,
            filterable: true,
            show_in_list: true,
            placeholder: None,
        });
        fields.push(EntityField {
            name: "publishedAt".to_string(),
            field_type: FieldType::Date,
            label: "Published At".to_string(),
            required: false,
            validation: None,
            relation: None,
            searchable: false,
            sortable: true,
            filterable: true,
            show_in_list: false,
            placeholder: None,
        });
    }

    if complexity == Complexity::Complex {
        fields.push(EntityField {
            name: "categoryId".to_string(),
            field_type: FieldType::Relation,
            label: "Category".to_string(),
            required: true,
            validation: None,
            relation: Some(FieldRelation {
                endpoint: "/api/categories".to_string(),
                display_field: "name".to_string(),
                value_field: "id".to_string(),
                search_fields: vec!["name".to_string()],
                multiple: false,
                preload: false,
                min_chars: 2,
                relation_entity: "Category".to_string(),
                allow_create: false,
            }),
            searchable: false,
            sortable: false,
            filterable: true,
            show_in_list: true,
            placeholder: Some("Search categories".to_string()),
        });
        fields.push(EntityField {
            name: "image".to_string(),
            field_type: FieldType::File,
            label: "Image".to_string(),
            required: false,
            validation: Some(FieldValidation {
                min: None,
                max: None,
                pattern: None,
                options: None,
                accept: Some("image/*".to_string()),
            }),
            relation: None,
            searchable: false,
            sortable: false,
            filterable: false,
            show_in_list: false,
            placeholder: None,
        });
    }

    GeneratorConfig {
        target_path: "./src".to_string(),
        api_endpoint: format!("/api/{endpoint_segment}"),
        entity_name,
        entity_name_plural,
        fields,
        relation_endpoints: BTreeMap::new(),
        permissions: CrudPermissions {
            create: true,
            read: true,
            update: true,
            delete: true,
        },
    }
}
