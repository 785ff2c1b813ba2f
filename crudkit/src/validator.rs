//! Configuration validation
//!
//! Validation is an explicit two-pass scan. Pass one applies structural
//! rules to each part of the configuration independently; pass two runs
//! named invariants over the whole field collection. Every violation is
//! appended to one shared list, so a caller always sees the complete defect
//! set rather than the first failure.

use crate::config::{
    CrudPermissions, EntityField, FieldType, GeneratorConfig, ValidationError, ValidationResult,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Validate a generator configuration.
///
/// Purely computational: no filesystem access. Warnings are advisory and
/// only computed for configurations that pass every check.
#[must_use]
pub fn validate(config: &GeneratorConfig) -> ValidationResult {
    let mut errors = Vec::new();

    // Pass 1: structural checks, each part on its own.
    check_target_path_syntax(&config.target_path, &mut errors);
    check_entity_name("entityName", &config.entity_name, &mut errors);
    check_entity_name("entityNamePlural", &config.entity_name_plural, &mut errors);
    check_api_endpoint(&config.api_endpoint, &mut errors);
    for (index, field) in config.fields.iter().enumerate() {
        check_field(index, field, &mut errors);
    }

    // Pass 2: invariants over the whole collection.
    check_fields_present(&config.fields, &mut errors);
    check_duplicate_names(&config.fields, &mut errors);
    check_list_visibility(&config.fields, &mut errors);
    check_relation_endpoints(config, &mut errors);
    check_permissions(config.permissions, &mut errors);

    let warnings = if errors.is_empty() {
        collect_warnings(config)
    } else {
        Vec::new()
    };

    debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        entity = %config.entity_name,
        "configuration validated"
    );

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Check that the target path is creatable and writable.
///
/// This is the one validator operation with side effects: the directory is
/// created if absent and probed with a throwaway file. It runs during full
/// generation, never during stand-alone [`validate`].
#[must_use]
pub fn validate_target_path(target_path: &str) -> ValidationResult {
    let mut errors = Vec::new();
    check_target_path_syntax(target_path, &mut errors);

    if errors.is_empty() {
        if let Err(error) = probe_writable(Path::new(target_path)) {
            let code = if error.kind() == std::io::ErrorKind::PermissionDenied {
                "permission_denied"
            } else {
                "filesystem_error"
            };
            errors.push(ValidationError::new(
                "targetPath",
                format!("Target directory is not writable: {error}"),
                code,
            ));
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings: Vec::new(),
    }
}

fn probe_writable(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let probe = dir.join(".crudkit-write-probe");
    fs::write(&probe, b"")?;
    fs::remove_file(&probe)
}

fn check_target_path_syntax(target_path: &str, errors: &mut Vec<ValidationError>) {
    if target_path.is_empty() {
        errors.push(ValidationError::new(
            "targetPath",
            "targetPath is required",
            "invalid_path",
        ));
        return;
    }
    if target_path.contains("..") || target_path.contains('<') || target_path.contains('>') {
        errors.push(ValidationError::new(
            "targetPath",
            "targetPath contains unsafe characters",
            "invalid_path",
        ));
    }
}

fn check_entity_name(field: &str, name: &str, errors: &mut Vec<ValidationError>) {
    if !is_identifier(name, char::is_ascii_alphabetic) {
        errors.push(ValidationError::new(
            field,
            format!("{field} must be a valid identifier (PascalCase), got '{name}'"),
            "invalid_entity_name",
        ));
    }
}

fn check_api_endpoint(endpoint: &str, errors: &mut Vec<ValidationError>) {
    if !is_valid_api_endpoint(endpoint) {
        errors.push(ValidationError::new(
            "apiEndpoint",
            format!("apiEndpoint must be an API route like /api/productos, got '{endpoint}'"),
            "invalid_endpoint",
        ));
    }
}

fn check_field(index: usize, field: &EntityField, errors: &mut Vec<ValidationError>) {
    let at = |suffix: &str| format!("fields.{index}.{suffix}");

    if !is_identifier(&field.name, char::is_ascii_lowercase) {
        errors.push(ValidationError::new(
            at("name"),
            format!("Field name must be a lowerCamel identifier, got '{}'", field.name),
            "invalid_field_name",
        ));
    }

    if field.label.is_empty() {
        errors.push(ValidationError::new(
            at("label"),
            format!("Field '{}' requires a label", field.name),
            "empty_label",
        ));
    }

    if let Some(validation) = &field.validation {
        if let (Some(min), Some(max)) = (validation.min, validation.max) {
            if min > max {
                errors.push(ValidationError::new(
                    at("validation"),
                    format!("Field '{}': validation.min cannot exceed validation.max", field.name),
                    "invalid_range",
                ));
            }
        }
    }

    // Type-conditional mandatory sub-config. The match is exhaustive so a
    // new field type cannot ship without declaring its requirements here.
    match field.field_type {
        FieldType::Relation => check_relation_block(index, field, errors),
        FieldType::Select => {
            let has_options = field
                .validation
                .as_ref()
                .and_then(|v| v.options.as_ref())
                .is_some_and(|options| !options.is_empty());
            if !has_options {
                errors.push(ValidationError::new(
                    at("validation.options"),
                    format!("Select field '{}' requires non-empty options", field.name),
                    "missing_select_options",
                ));
            }
        }
        FieldType::File => {
            let has_accept = field
                .validation
                .as_ref()
                .and_then(|v| v.accept.as_ref())
                .is_some_and(|accept| !accept.is_empty());
            if !has_accept {
                errors.push(ValidationError::new(
                    at("validation.accept"),
                    format!("File field '{}' requires accepted file types", field.name),
                    "missing_file_accept",
                ));
            }
        }
        FieldType::Text
        | FieldType::Number
        | FieldType::Email
        | FieldType::Password
        | FieldType::Textarea
        | FieldType::Date
        | FieldType::Boolean => {}
    }
}

fn check_relation_block(index: usize, field: &EntityField, errors: &mut Vec<ValidationError>) {
    let at = |suffix: &str| format!("fields.{index}.{suffix}");

    let Some(relation) = &field.relation else {
        errors.push(ValidationError::new(
            at("relation"),
            format!("Relation field '{}' requires a relation configuration", field.name),
            "missing_relation_config",
        ));
        return;
    };

    if relation.search_fields.is_empty() {
        errors.push(ValidationError::new(
            at("relation.searchFields"),
            format!("Relation field '{}' requires at least one search field", field.name),
            "empty_search_fields",
        ));
    }

    if relation.min_chars > 5 {
        errors.push(ValidationError::new(
            at("relation.minChars"),
            format!(
                "Relation field '{}': minChars should not exceed 5, got {}",
                field.name, relation.min_chars
            ),
            "high_min_chars",
        ));
    }
}

fn check_fields_present(fields: &[EntityField], errors: &mut Vec<ValidationError>) {
    if fields.is_empty() {
        errors.push(ValidationError::new(
            "fields",
            "At least one field is required",
            "no_fields",
        ));
    }
}

fn check_duplicate_names(fields: &[EntityField], errors: &mut Vec<ValidationError>) {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            duplicates.insert(field.name.as_str());
        }
    }
    if !duplicates.is_empty() {
        let names: Vec<&str> = duplicates.into_iter().collect();
        errors.push(ValidationError::new(
            "fields",
            format!("Duplicate field names: {}", names.join(", ")),
            "duplicate_field_names",
        ));
    }
}

fn check_list_visibility(fields: &[EntityField], errors: &mut Vec<ValidationError>) {
    if !fields.is_empty() && !fields.iter().any(|f| f.show_in_list) {
        errors.push(ValidationError::new(
            "fields",
            "At least one field must have showInList: true",
            "no_list_fields",
        ));
    }
}

fn check_relation_endpoints(config: &GeneratorConfig, errors: &mut Vec<ValidationError>) {
    for field in &config.fields {
        if field.field_type != FieldType::Relation {
            continue;
        }
        let own = field
            .relation
            .as_ref()
            .map(|r| r.endpoint.as_str())
            .filter(|endpoint| !endpoint.is_empty());
        let from_map = config
            .relation_endpoints
            .get(&field.name)
            .map(String::as_str)
            .filter(|endpoint| !endpoint.is_empty());
        if own.is_none() && from_map.is_none() {
            errors.push(ValidationError::new(
                "relationEndpoints",
                format!("Missing endpoint for relation field '{}'", field.name),
                "missing_relation_endpoint",
            ));
        }
    }
}

fn check_permissions(permissions: CrudPermissions, errors: &mut Vec<ValidationError>) {
    if !permissions.any() {
        errors.push(ValidationError::new(
            "permissions",
            "At least one permission must be enabled",
            "no_permissions",
        ));
    }
}

fn collect_warnings(config: &GeneratorConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let in_list = config.fields.iter().filter(|f| f.show_in_list).count();
    if in_list > 8 {
        warnings.push(format!(
            "{in_list} fields will be shown in the list. Consider reducing the column count."
        ));
    }

    if !config.fields.iter().any(|f| f.searchable) {
        warnings.push(
            "No field is marked searchable. Users will not be able to search records.".to_string(),
        );
    }

    if !config.fields.iter().any(|f| f.sortable) {
        warnings.push(
            "No field is marked sortable. Users will not be able to sort records.".to_string(),
        );
    }

    let preloaded = config
        .fields
        .iter()
        .filter(|f| {
            f.field_type == FieldType::Relation
                && f.relation.as_ref().is_some_and(|r| r.preload)
        })
        .count();
    if preloaded > 0 {
        warnings.push(format!(
            "{preloaded} relation field(s) have preload enabled. This can hurt performance with many records."
        ));
    }

    if config.entity_name == config.entity_name_plural {
        warnings.push(
            "entityNamePlural equals entityName. Check that the plural form is intended."
                .to_string(),
        );
    }

    let required_without_min = config
        .fields
        .iter()
        .filter(|f| {
            f.required
                && f.field_type == FieldType::Text
                && !f
                    .validation
                    .as_ref()
                    .and_then(|v| v.min)
                    .is_some_and(|min| min > 0.0)
        })
        .count();
    if required_without_min > 0 {
        warnings.push(format!(
            "{required_without_min} required text field(s) have no minimum-length validation."
        ));
    }

    warnings
}

fn is_identifier(name: &str, first: impl Fn(&char) -> bool) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| first(&c)) && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_valid_api_endpoint(endpoint: &str) -> bool {
    let Some(rest) = endpoint.strip_prefix("/api/") else {
        return false;
    };
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldRelation, FieldValidation};
    use std::collections::BTreeMap;

    fn text_field(name: &str) -> EntityField {
        EntityField {
            name: name.to_string(),
            field_type: FieldType::Text,
            label: name.to_string(),
            required: false,
            validation: None,
            relation: None,
            searchable: true,
            sortable: true,
            filterable: false,
            show_in_list: true,
            placeholder: None,
        }
    }

    fn relation(endpoint: &str) -> FieldRelation {
        FieldRelation {
            endpoint: endpoint.to_string(),
            display_field: "nombre".to_string(),
            value_field: "id".to_string(),
            search_fields: vec!["nombre".to_string()],
            multiple: false,
            preload: false,
            min_chars: 2,
            relation_entity: "Marca".to_string(),
            allow_create: false,
        }
    }

    fn valid_config() -> GeneratorConfig {
        GeneratorConfig {
            target_path: "./src/modules/producto".to_string(),
            entity_name: "Producto".to_string(),
            entity_name_plural: "Productos".to_string(),
            fields: vec![text_field("nombre")],
            api_endpoint: "/api/productos".to_string(),
            relation_endpoints: BTreeMap::new(),
            permissions: CrudPermissions {
                create: true,
                read: true,
                update: false,
                delete: false,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let result = validate(&valid_config());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_spec_producto_scenario() {
        let mut config = valid_config();
        config.fields[0].required = true;
        let result = validate(&config);
        assert!(result.valid);
        // Required text field without minimum-length validation is advisory only.
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("minimum-length")));
    }

    #[test]
    fn test_traversal_target_path_rejected() {
        let mut config = valid_config();
        config.target_path = "../../../etc/passwd".to_string();
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "targetPath" && e.code == "invalid_path"));
    }

    #[test]
    fn test_invalid_entity_name_rejected() {
        let mut config = valid_config();
        config.entity_name = "123Producto".to_string();
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.field == "entityName"));
    }

    #[test]
    fn test_endpoint_without_api_prefix_is_single_error() {
        let mut config = valid_config();
        config.api_endpoint = "productos".to_string();
        let result = validate(&config);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "apiEndpoint");
        assert_eq!(result.errors[0].code, "invalid_endpoint");
    }

    #[test]
    fn test_duplicate_names_reported_once_listing_all() {
        let mut config = valid_config();
        config.fields = vec![
            text_field("nombre"),
            text_field("nombre"),
            text_field("precio"),
            text_field("precio"),
            text_field("stock"),
        ];
        let result = validate(&config);
        assert!(!result.valid);
        let duplicate_errors: Vec<_> = result
            .errors
            .iter()
            .filter(|e| e.code == "duplicate_field_names")
            .collect();
        assert_eq!(duplicate_errors.len(), 1);
        assert!(duplicate_errors[0].message.contains("nombre"));
        assert!(duplicate_errors[0].message.contains("precio"));
        assert!(!duplicate_errors[0].message.contains("stock"));
    }

    #[test]
    fn test_show_in_list_flip() {
        let mut config = valid_config();
        config.fields[0].show_in_list = false;
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "fields" && e.code == "no_list_fields"));

        config.fields[0].show_in_list = true;
        assert!(validate(&config).valid);
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut config = valid_config();
        config.fields.clear();
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == "no_fields"));
        // An empty collection is not additionally reported as invisible.
        assert!(!result.errors.iter().any(|e| e.code == "no_list_fields"));
    }

    #[test]
    fn test_permission_flip() {
        let mut config = valid_config();
        config.permissions = CrudPermissions {
            create: false,
            read: false,
            update: false,
            delete: false,
        };
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == "no_permissions"));

        config.permissions.read = true;
        assert!(validate(&config).valid);
    }

    #[test]
    fn test_select_requires_options() {
        let mut config = valid_config();
        let mut field = text_field("estado");
        field.field_type = FieldType::Select;
        config.fields.push(field);
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == "missing_select_options" && e.field.contains("validation.options")));

        config.fields[1].validation = Some(FieldValidation {
            options: Some(vec!["activo".to_string(), "inactivo".to_string()]),
            ..FieldValidation::default()
        });
        assert!(validate(&config).valid);
    }

    #[test]
    fn test_file_requires_accept() {
        let mut config = valid_config();
        let mut field = text_field("imagen");
        field.field_type = FieldType::File;
        config.fields.push(field);
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == "missing_file_accept"));
    }

    #[test]
    fn test_relation_requires_block() {
        let mut config = valid_config();
        let mut field = text_field("marca");
        field.field_type = FieldType::Relation;
        config.fields.push(field);
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == "missing_relation_config"));
    }

    #[test]
    fn test_relation_endpoint_resolved_from_override_map() {
        let mut config = valid_config();
        let mut field = text_field("marca");
        field.field_type = FieldType::Relation;
        field.relation = Some(relation(""));
        config.fields.push(field);

        let result = validate(&config);
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "relationEndpoints" && e.code == "missing_relation_endpoint"));

        config
            .relation_endpoints
            .insert("marca".to_string(), "/api/marcas".to_string());
        assert!(validate(&config).valid);
    }

    #[test]
    fn test_relation_min_chars_and_search_fields() {
        let mut config = valid_config();
        let mut field = text_field("marca");
        field.field_type = FieldType::Relation;
        let mut rel = relation("/api/marcas");
        rel.min_chars = 7;
        rel.search_fields.clear();
        field.relation = Some(rel);
        config.fields.push(field);

        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == "high_min_chars"));
        assert!(result.errors.iter().any(|e| e.code == "empty_search_fields"));
    }

    #[test]
    fn test_min_max_range() {
        let mut config = valid_config();
        config.fields[0].validation = Some(FieldValidation {
            min: Some(10.0),
            max: Some(2.0),
            ..FieldValidation::default()
        });
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == "invalid_range"));
    }

    #[test]
    fn test_invalid_field_name() {
        let mut config = valid_config();
        config.fields[0].name = "Nombre".to_string();
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "fields.0.name" && e.code == "invalid_field_name"));
    }

    #[test]
    fn test_warnings_do_not_affect_validity() {
        let mut config = valid_config();
        config.entity_name_plural.clone_from(&config.entity_name);
        config.fields[0].searchable = false;
        config.fields[0].sortable = false;
        let result = validate(&config);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("searchable")));
        assert!(result.warnings.iter().any(|w| w.contains("sortable")));
        assert!(result.warnings.iter().any(|w| w.contains("entityNamePlural")));
    }

    #[test]
    fn test_too_many_list_fields_warns() {
        let mut config = valid_config();
        config.fields = (0..9)
            .map(|i| text_field(&format!("campo{i}")))
            .collect();
        let result = validate(&config);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("9 fields")));
    }

    #[test]
    fn test_preload_relation_warns() {
        let mut config = valid_config();
        let mut field = text_field("marca");
        field.field_type = FieldType::Relation;
        let mut rel = relation("/api/marcas");
        rel.preload = true;
        field.relation = Some(rel);
        config.fields.push(field);
        let result = validate(&config);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.contains("preload")));
    }

    #[test]
    fn test_invalid_config_has_no_warnings() {
        let mut config = valid_config();
        config.fields[0].sortable = false;
        config.fields[0].searchable = false;
        config.api_endpoint = "productos".to_string();
        let result = validate(&config);
        assert!(!result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_target_path_creates_and_probes() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("modules").join("producto");
        let result = validate_target_path(target.to_str().unwrap());
        assert!(result.valid, "{:?}", result.errors);
        assert!(target.is_dir());
    }

    #[test]
    fn test_validate_target_path_rejects_traversal_without_touching_fs() {
        let result = validate_target_path("../outside");
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, "invalid_path");
    }
}
