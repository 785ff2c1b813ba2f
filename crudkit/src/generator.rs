//! Template materialization engine
//!
//! Coordinates a full generation run: validate the configuration, probe the
//! target path, build the render context, discover template artifacts,
//! render each into its destination, and aggregate per-file outcomes into
//! one [`GenerationResult`]. No error ever escapes [`CrudGenerator::generate`];
//! every failure path is translated into the result shape.

use crate::config::{
    FieldType, FileKind, GeneratedFile, GenerationResult, GeneratorConfig, GeneratorOptions,
};
use crate::context::TemplateContext;
use crate::error::GeneratorError;
use crate::{naming, validator};
use handlebars::{handlebars_helper, Handlebars};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Suffix marking a file under the template root as a template artifact.
const TEMPLATE_SUFFIX: &str = ".template";

/// How a bracketed filename token is resolved against the render context.
#[derive(Clone, Copy)]
enum TokenResolution {
    /// Substitute the resolver's output for the token
    Resolve(fn(&TemplateContext) -> &str),
    /// Leave the token in place; the destination framework interprets it
    PassThrough,
}

/// Ordered filename placeholder table. `[id]` denotes a Next.js dynamic
/// route segment and must survive substitution untouched.
const FILENAME_TOKENS: &[(&str, TokenResolution)] = &[
    ("[Entity]", TokenResolution::Resolve(|c| &c.entity_name)),
    ("[entity]", TokenResolution::Resolve(|c| &c.entity_name_lower)),
    ("[ENTITY]", TokenResolution::Resolve(|c| &c.entity_name_upper)),
    ("[Entities]", TokenResolution::Resolve(|c| &c.entity_name_plural)),
    ("[entities]", TokenResolution::Resolve(|c| &c.entity_name_plural_lower)),
    ("[id]", TokenResolution::PassThrough),
];

/// What happened to one template artifact during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    /// Rendered and written to disk
    Written,
    /// Dry run: recorded without touching the filesystem
    Simulated,
    /// Destination already existed and overwrite was off
    Skipped,
}

/// CRUD module generator over a fixed template root.
pub struct CrudGenerator {
    template_root: PathBuf,
    handlebars: Handlebars<'static>,
}

impl CrudGenerator {
    /// Create a generator reading template artifacts from `template_root`.
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            handlebars: build_handlebars(),
        }
    }

    /// The template root this generator discovers artifacts under.
    #[must_use]
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Validate a configuration without touching the filesystem.
    #[must_use]
    pub fn validate(config: &GeneratorConfig) -> crate::config::ValidationResult {
        validator::validate(config)
    }

    /// Generate a complete CRUD module.
    ///
    /// Per-file errors are isolated: a failing template is reported in the
    /// result's error list and the run continues with the next artifact.
    /// Fatal conditions (invalid configuration, unwritable target, missing
    /// or empty template root) abort the run with `success: false`.
    #[must_use]
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        options: &GeneratorOptions,
    ) -> GenerationResult {
        info!(entity = %config.entity_name, dry_run = options.dry_run, "starting CRUD generation");

        let mut warnings = Vec::new();
        if options.skip_validation {
            debug!("configuration validation skipped");
        } else {
            let validation = validator::validate(config);
            if !validation.valid {
                return GenerationResult::failure(
                    "Invalid configuration",
                    validation
                        .errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect(),
                );
            }
            for warning in &validation.warnings {
                warn!("{warning}");
            }
            warnings = validation.warnings;
        }

        // The writability probe creates the target directory, so a dry run
        // must not perform it.
        if !options.dry_run {
            let path_validation = validator::validate_target_path(&config.target_path);
            if !path_validation.valid {
                return GenerationResult::failure(
                    "Target directory is not usable",
                    path_validation
                        .errors
                        .into_iter()
                        .map(|e| e.message)
                        .collect(),
                );
            }
        }

        let context = TemplateContext::from_config(config);

        let templates = match self.find_template_files() {
            Ok(templates) => templates,
            Err(fatal) => {
                error!("{fatal}");
                return GenerationResult::failure("Template discovery failed", vec![fatal.to_string()]);
            }
        };
        debug!(count = templates.len(), "templates discovered");

        let target_base = Path::new(&config.target_path);
        let mut files = Vec::new();
        let mut errors = Vec::new();
        let mut skipped = 0_usize;

        for relative in &templates {
            match self.process_template(relative, &context, target_base, options) {
                Ok((file, outcome)) => {
                    if outcome == FileOutcome::Skipped {
                        skipped += 1;
                    }
                    debug!(path = %file.path, ?outcome, "template processed");
                    files.push(file);
                }
                Err(failure) => {
                    let message = format!("Error processing {}: {failure}", relative.display());
                    error!("{message}");
                    errors.push(message);
                }
            }
        }

        // Documentation failure is logged but never fails the run.
        match self.generate_readme(&context, target_base, options) {
            Ok((file, outcome)) => {
                if outcome == FileOutcome::Skipped {
                    skipped += 1;
                }
                files.push(file);
            }
            Err(failure) => error!("Failed to write module documentation: {failure}"),
        }

        let success = errors.is_empty();
        let message = if success {
            if skipped > 0 {
                format!(
                    "CRUD generated for {} ({} files, {skipped} already present and skipped)",
                    context.entity_name,
                    files.len()
                )
            } else {
                format!(
                    "CRUD generated successfully for {} ({} files)",
                    context.entity_name,
                    files.len()
                )
            }
        } else {
            format!(
                "Generation completed with errors ({} files created, {} errors)",
                files.len(),
                errors.len()
            )
        };

        if success {
            info!("{message}");
        } else {
            error!("{message}");
        }

        GenerationResult {
            success,
            message,
            files_created: files.into_iter().map(|f| f.path).collect(),
            errors,
            warnings,
        }
    }

    /// Discover template artifacts under the root: lexicographic by
    /// relative path, duplicates removed, arbitrary nesting.
    fn find_template_files(&self) -> Result<Vec<PathBuf>, GeneratorError> {
        if !self.template_root.is_dir() {
            return Err(GeneratorError::TemplateRoot(self.template_root.clone()));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.template_root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(TEMPLATE_SUFFIX))
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.template_root)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect();

        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(GeneratorError::NoTemplates(self.template_root.clone()));
        }
        Ok(files)
    }

    /// Render one template artifact and apply the collision/backup/dry-run
    /// policy to its destination.
    fn process_template(
        &self,
        relative: &Path,
        context: &TemplateContext,
        target_base: &Path,
        options: &GeneratorOptions,
    ) -> Result<(GeneratedFile, FileOutcome), GeneratorError> {
        let source = self.template_root.join(relative);
        let template_text =
            fs::read_to_string(&source).map_err(|source_err| GeneratorError::TemplateRead {
                path: source.clone(),
                source: source_err,
            })?;

        let rendered = self.handlebars.render_template(&template_text, context)?;

        let destination = resolve_destination(target_base, relative, context);
        let kind = FileKind::classify(&destination);
        let template_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.materialize(
            &destination,
            kind,
            &rendered,
            &template_name,
            options,
        )
    }

    /// Shared write path for rendered artifacts and the documentation file.
    fn materialize(
        &self,
        destination: &Path,
        kind: FileKind,
        content: &str,
        provenance: &str,
        options: &GeneratorOptions,
    ) -> Result<(GeneratedFile, FileOutcome), GeneratorError> {
        let path = destination.display().to_string();

        if destination.exists() && !options.overwrite {
            warn!("File already exists, skipping: {path} (use overwrite to replace)");
            return Ok((
                GeneratedFile {
                    path,
                    kind,
                    description: format!("Skipped, already exists ({provenance})"),
                },
                FileOutcome::Skipped,
            ));
        }

        if options.dry_run {
            info!("[dry run] would generate: {path}");
            return Ok((
                GeneratedFile {
                    path,
                    kind,
                    description: format!("Template: {provenance}"),
                },
                FileOutcome::Simulated,
            ));
        }

        if destination.exists() {
            let backup = create_backup(destination)?;
            debug!("Backup created: {}", backup.display());
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(destination, content)?;

        Ok((
            GeneratedFile {
                path,
                kind,
                description: format!("Generated from {provenance}"),
            },
            FileOutcome::Written,
        ))
    }

    /// Produce the README.md documentation artifact at the target root.
    fn generate_readme(
        &self,
        context: &TemplateContext,
        target_base: &Path,
        options: &GeneratorOptions,
    ) -> Result<(GeneratedFile, FileOutcome), GeneratorError> {
        let destination = target_base.join("README.md");
        let content = readme_content(context);
        self.materialize(&destination, FileKind::Other, &content, "module documentation", options)
    }
}

/// Map a template's relative path onto the target tree: substitute filename
/// tokens, then strip the template suffix.
fn resolve_destination(target_base: &Path, relative: &Path, context: &TemplateContext) -> PathBuf {
    let mut path = relative.to_string_lossy().into_owned();

    for (token, resolution) in FILENAME_TOKENS {
        match resolution {
            TokenResolution::Resolve(resolver) => {
                path = path.replace(token, resolver(context));
            }
            TokenResolution::PassThrough => {}
        }
    }

    if let Some(stripped) = path.strip_suffix(TEMPLATE_SUFFIX) {
        path = stripped.to_string();
    }

    target_base.join(path)
}

/// Copy an existing destination file aside under a timestamped name.
fn create_backup(path: &Path) -> Result<PathBuf, GeneratorError> {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let backup = PathBuf::from(format!("{}.backup.{timestamp}", path.display()));
    fs::copy(path, &backup)?;
    Ok(backup)
}

/// Build the handlebars registry with code-generation helpers. Escaping is
/// disabled: the output is source code, not HTML.
fn build_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars_helper!(eq_helper: |a: Json, b: Json| a == b);
    handlebars_helper!(neq_helper: |a: Json, b: Json| a != b);
    handlebars_helper!(and_helper: |a: bool, b: bool| a && b);
    handlebars_helper!(or_helper: |a: bool, b: bool| a || b);
    handlebars_helper!(not_helper: |a: bool| !a);
    handlebars_helper!(capitalize_helper: |s: str| naming::capitalize(s));
    handlebars_helper!(lower_helper: |s: str| s.to_lowercase());
    handlebars_helper!(upper_helper: |s: str| s.to_uppercase());
    handlebars_helper!(camel_helper: |s: str| naming::camel_case(s));
    handlebars_helper!(kebab_helper: |s: str| naming::kebab_case(s));
    handlebars_helper!(snake_helper: |s: str| naming::snake_case(s));
    handlebars_helper!(json_helper: |v: Json| serde_json::to_string_pretty(v).unwrap_or_default());
    handlebars_helper!(ts_type_helper: |field_type: str| {
        FieldType::ALL
            .iter()
            .find(|t| t.to_string() == field_type)
            .map_or("string", |t| t.ts_type())
    });

    handlebars.register_helper("eq", Box::new(eq_helper));
    handlebars.register_helper("neq", Box::new(neq_helper));
    handlebars.register_helper("and", Box::new(and_helper));
    handlebars.register_helper("or", Box::new(or_helper));
    handlebars.register_helper("not", Box::new(not_helper));
    handlebars.register_helper("capitalize", Box::new(capitalize_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("camelCase", Box::new(camel_helper));
    handlebars.register_helper("kebabCase", Box::new(kebab_helper));
    handlebars.register_helper("snakeCase", Box::new(snake_helper));
    handlebars.register_helper("json", Box::new(json_helper));
    handlebars.register_helper("tsType", Box::new(ts_type_helper));

    handlebars
}

/// Render the module documentation summarizing the entity, its fields,
/// capabilities, permissions, and endpoint shapes.
fn readme_content(context: &TemplateContext) -> String {
    let mut doc = String::new();

    doc.push_str(&format!(
        "# {} CRUD Module\n\nGenerated by crudkit v{} on {}\n\n",
        context.entity_name_plural, context.version, context.timestamp
    ));
    doc.push_str(&format!(
        "Complete CRUD (Create, Read, Update, Delete) functionality for {} in a Next.js application.\n\n",
        context.entity_name_plural
    ));

    doc.push_str("## Permissions\n\n");
    for (action, enabled) in [
        ("CREATE", context.permissions.create),
        ("READ", context.permissions.read),
        ("UPDATE", context.permissions.update),
        ("DELETE", context.permissions.delete),
    ] {
        doc.push_str(&format!(
            "- {action}: {}\n",
            if enabled { "enabled" } else { "disabled" }
        ));
    }

    doc.push_str("\n## Fields\n\n");
    for field in &context.fields {
        let mut capabilities = Vec::new();
        if field.searchable {
            capabilities.push("searchable");
        }
        if field.sortable {
            capabilities.push("sortable");
        }
        if field.filterable {
            capabilities.push("filterable");
        }
        if field.show_in_list {
            capabilities.push("listed");
        }
        doc.push_str(&format!(
            "- **{}** (`{}`){}: {}\n",
            field.label,
            field.field_type,
            if field.required { ", required" } else { "" },
            if capabilities.is_empty() {
                "display only".to_string()
            } else {
                capabilities.join(", ")
            }
        ));
    }

    doc.push_str(&format!(
        "\n## API Endpoints\n\n\
         - `GET {endpoint}`: list {plural}\n\
         - `POST {endpoint}`: create {single}\n\
         - `GET {endpoint}/[id]`: get {single} by id\n\
         - `PUT {endpoint}/[id]`: update {single}\n\
         - `DELETE {endpoint}/[id]`: delete {single}\n",
        endpoint = context.api_endpoint,
        plural = context.entity_name_plural_lower,
        single = context.entity_name_lower,
    ));

    let relation_count = context
        .fields
        .iter()
        .filter(|f| f.field_type == FieldType::Relation)
        .count();
    doc.push_str(&format!(
        "\n---\n\nGenerated with {} fields, {relation_count} relation(s).\n",
        context.fields.len()
    ));

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrudPermissions, EntityField, FieldType};
    use std::collections::BTreeMap;

    fn context() -> TemplateContext {
        TemplateContext::from_config(&config())
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            target_path: "./out".to_string(),
            entity_name: "Producto".to_string(),
            entity_name_plural: "Productos".to_string(),
            fields: vec![EntityField {
                name: "nombre".to_string(),
                field_type: FieldType::Text,
                label: "Nombre".to_string(),
                required: true,
                validation: None,
                relation: None,
                searchable: true,
                sortable: true,
                filterable: true,
                show_in_list: true,
                placeholder: None,
            }],
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
    fn test_filename_token_substitution() {
        let context = context();
        let destination = resolve_destination(
            Path::new("/out"),
            Path::new("components/[Entity]List.tsx.template"),
            &context,
        );
        assert_eq!(destination, PathBuf::from("/out/components/ProductoList.tsx"));

        let destination = resolve_destination(
            Path::new("/out"),
            Path::new("pages/[entities]/index.tsx.template"),
            &context,
        );
        assert_eq!(destination, PathBuf::from("/out/pages/productos/index.tsx"));
    }

    #[test]
    fn test_dynamic_route_token_passes_through() {
        let context = context();
        let destination = resolve_destination(
            Path::new("/out"),
            Path::new("api/[entities]/[id].ts.template"),
            &context,
        );
        assert_eq!(destination, PathBuf::from("/out/api/productos/[id].ts"));
    }

    #[test]
    fn test_all_casing_tokens_resolve() {
        let context = context();
        let destination = resolve_destination(
            Path::new("/out"),
            Path::new("x/[Entity]-[entity]-[ENTITY]-[Entities]-[entities].ts.template"),
            &context,
        );
        assert_eq!(
            destination,
            PathBuf::from("/out/x/Producto-producto-PRODUCTO-Productos-productos.ts")
        );
    }

    #[test]
    fn test_rendering_helpers() {
        let handlebars = build_handlebars();
        let rendered = handlebars
            .render_template(
                "{{capitalize \"producto\"}} {{kebabCase \"MiEntidad\"}} {{tsType \"number\"}}",
                &serde_json::json!({}),
            )
            .unwrap();
        assert_eq!(rendered, "Producto mi-entidad number");
    }

    #[test]
    fn test_ts_type_helper_follows_field_type_mapping() {
        let handlebars = build_handlebars();
        for field_type in FieldType::ALL {
            let rendered = handlebars
                .render_template("{{tsType t}}", &serde_json::json!({ "t": field_type }))
                .unwrap();
            assert_eq!(rendered, field_type.ts_type(), "{field_type}");
        }
    }

    #[test]
    fn test_rendering_does_not_escape_code() {
        let handlebars = build_handlebars();
        let rendered = handlebars
            .render_template("const a = <T,>(x: T) => x && \"{{NAME}}\";", &serde_json::json!({"NAME": "Producto"}))
            .unwrap();
        assert_eq!(rendered, "const a = <T,>(x: T) => x && \"Producto\";");
    }

    #[test]
    fn test_field_loop_rendering() {
        let handlebars = build_handlebars();
        let rendered = handlebars
            .render_template(
                "{{#each FIELDS}}{{name}}: {{tsType type}};{{/each}}",
                &context(),
            )
            .unwrap();
        assert_eq!(rendered, "nombre: string;");
    }

    #[test]
    fn test_missing_template_root_is_fatal() {
        let generator = CrudGenerator::new("/nonexistent/template/root");
        let result = generator.generate(&config(), &GeneratorOptions::default());
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert!(result.files_created.is_empty());
    }

    #[test]
    fn test_invalid_config_aborts_with_all_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ts.template"), "x").unwrap();
        let generator = CrudGenerator::new(dir.path());

        let mut bad = config();
        bad.api_endpoint = "productos".to_string();
        bad.fields[0].show_in_list = false;
        let result = generator.generate(&bad, &GeneratorOptions::default());
        assert!(!result.success);
        assert_eq!(result.message, "Invalid configuration");
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_readme_content_lists_fields_and_endpoints() {
        let content = readme_content(&context());
        assert!(content.contains("# Productos CRUD Module"));
        assert!(content.contains("**Nombre** (`text`), required"));
        assert!(content.contains("GET /api/productos/[id]"));
        assert!(content.contains("CREATE: enabled"));
        assert!(content.contains("UPDATE: disabled"));
    }
}
