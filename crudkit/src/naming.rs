//! Naming transformations for code generation
//!
//! Every name variant that appears in a render context or a generated file
//! name is derived through these functions. The conversion rules are fixed
//! by the generated-code contract (template authors rely on them), so they
//! are implemented here directly instead of through a general-purpose
//! inflection crate whose edge-case behavior differs.

/// Convert a string to `PascalCase`.
///
/// The first letter of each whitespace-delimited word is uppercased and the
/// words are concatenated. Characters after the first of each word are kept
/// as-is, so existing interior capitals survive.
///
/// # Examples
///
/// ```
/// # use crudkit::naming::pascal_case;
/// assert_eq!(pascal_case("mi entidad"), "MiEntidad");
/// assert_eq!(pascal_case("producto"), "Producto");
/// ```
#[must_use]
pub fn pascal_case(input: &str) -> String {
    input.split_whitespace().map(capitalize).collect()
}

/// Convert a string to `camelCase` (`PascalCase` with the first character
/// lowercased).
///
/// # Examples
///
/// ```
/// # use crudkit::naming::camel_case;
/// assert_eq!(camel_case("Mi Entidad"), "miEntidad");
/// assert_eq!(camel_case("Producto"), "producto");
/// ```
#[must_use]
pub fn camel_case(input: &str) -> String {
    uncapitalize(&pascal_case(input))
}

/// Convert a string to `kebab-case`.
///
/// A `-` is inserted at every lower-to-upper transition and at whitespace
/// runs, then the whole string is lowercased.
///
/// # Examples
///
/// ```
/// # use crudkit::naming::kebab_case;
/// assert_eq!(kebab_case("MiEntidad"), "mi-entidad");
/// assert_eq!(kebab_case("Producto Simple"), "producto-simple");
/// ```
#[must_use]
pub fn kebab_case(input: &str) -> String {
    separate_words(input, '-')
}

/// Convert a string to `snake_case`.
///
/// Same word-splitting rule as [`kebab_case`] with `_` as the separator.
///
/// # Examples
///
/// ```
/// # use crudkit::naming::snake_case;
/// assert_eq!(snake_case("MiEntidad"), "mi_entidad");
/// assert_eq!(snake_case("Producto Simple"), "producto_simple");
/// ```
#[must_use]
pub fn snake_case(input: &str) -> String {
    separate_words(input, '_')
}

fn separate_words(input: &str, sep: char) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    let mut prev_sep = false;

    for c in input.chars() {
        if c.is_whitespace() {
            if !prev_sep && !out.is_empty() {
                out.push(sep);
                prev_sep = true;
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            out.push(sep);
        }
        out.extend(c.to_lowercase());
        prev_lower = c.is_lowercase();
        prev_sep = false;
    }

    out
}

/// Naive pluralization.
///
/// Rules, in order: a trailing `s` is left unchanged; a trailing `y` becomes
/// `ies`; a trailing `ch`, `sh`, `x`, or `z` appends `es`; everything else
/// appends `s`. Irregular plurals are out of scope: caller-supplied plural
/// names are authoritative, this function only feeds example generation.
///
/// # Examples
///
/// ```
/// # use crudkit::naming::pluralize;
/// assert_eq!(pluralize("producto"), "productos");
/// assert_eq!(pluralize("entity"), "entities");
/// assert_eq!(pluralize("box"), "boxes");
/// ```
#[must_use]
pub fn pluralize(input: &str) -> String {
    if input.ends_with('s') {
        return input.to_string();
    }
    if let Some(stem) = input.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if input.ends_with("ch")
        || input.ends_with("sh")
        || input.ends_with('x')
        || input.ends_with('z')
    {
        return format!("{input}es");
    }
    format!("{input}s")
}

/// Uppercase the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Lowercase the first character, leaving the rest untouched.
#[must_use]
pub fn uncapitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("mi entidad"), "MiEntidad");
        assert_eq!(pascal_case("producto"), "Producto");
        assert_eq!(pascal_case("mi entidad compleja"), "MiEntidadCompleja");
        assert_eq!(pascal_case("miEntidad"), "MiEntidad");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("Mi Entidad"), "miEntidad");
        assert_eq!(camel_case("Producto"), "producto");
        assert_eq!(camel_case("mi entidad compleja"), "miEntidadCompleja");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("MiEntidad"), "mi-entidad");
        assert_eq!(kebab_case("miEntidadCompleja"), "mi-entidad-compleja");
        assert_eq!(kebab_case("Producto Simple"), "producto-simple");
        assert_eq!(kebab_case("simple"), "simple");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("MiEntidad"), "mi_entidad");
        assert_eq!(snake_case("miEntidadCompleja"), "mi_entidad_compleja");
        assert_eq!(snake_case("Producto Simple"), "producto_simple");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("producto"), "productos");
        assert_eq!(pluralize("entity"), "entities");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("buzz"), "buzzes");
        // Trailing s is treated as already plural.
        assert_eq!(pluralize("productos"), "productos");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("producto"), "Producto");
        assert_eq!(capitalize("miEntidad"), "MiEntidad");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_uncapitalize() {
        assert_eq!(uncapitalize("Producto"), "producto");
        assert_eq!(uncapitalize("MiEntidad"), "miEntidad");
        assert_eq!(uncapitalize(""), "");
    }
}
