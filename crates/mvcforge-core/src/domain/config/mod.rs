//! Configuration documents.
//!
//! A [`PhpValue`] tree models the `return array(...);` payload of
//! application and module config files. Mapping entries keep their source
//! order: the tree is a `Vec` of entries, not a hash map, so re-exporting
//! a document never reorders what the user had.
//!
//! Scalars the parser cannot type (constant expressions such as
//! `__DIR__ . '/../view'`) are carried as [`PhpValue::Raw`] and re-emitted
//! untouched.

pub mod parser;

pub use parser::parse_config_document;

use crate::domain::error::DomainError;

/// A PHP literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// An expression preserved verbatim, e.g. `__DIR__ . '/../view'`.
    Raw(String),
    /// `array(...)` / `[...]` with ordered entries.
    Array(Vec<PhpEntry>),
}

/// One array entry; `key` is `None` for list-style elements.
#[derive(Debug, Clone, PartialEq)]
pub struct PhpEntry {
    pub key: Option<PhpKey>,
    pub value: PhpValue,
}

/// An array key. Only the key shapes this engine generates are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhpKey {
    Str(String),
    Int(i64),
}

impl PhpValue {
    /// Empty ordered array.
    pub fn array() -> Self {
        Self::Array(Vec::new())
    }

    /// Push a keyless element (list semantics).
    pub fn push(&mut self, value: PhpValue) {
        if let Self::Array(entries) = self {
            entries.push(PhpEntry { key: None, value });
        }
    }

    /// Insert `key => value` at the end, replacing nothing.
    pub fn insert(&mut self, key: &str, value: PhpValue) {
        if let Self::Array(entries) = self {
            entries.push(PhpEntry {
                key: Some(PhpKey::Str(key.to_string())),
                value,
            });
        }
    }

    /// Value under a string key, if this is an array and the key exists.
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        match self {
            Self::Array(entries) => entries.iter().find_map(|e| match &e.key {
                Some(PhpKey::Str(k)) if k == key => Some(&e.value),
                _ => None,
            }),
            _ => None,
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut PhpValue> {
        match self {
            Self::Array(entries) => entries.iter_mut().find_map(|e| match &e.key {
                Some(PhpKey::Str(k)) if k == key => Some(&mut e.value),
                _ => None,
            }),
            _ => None,
        }
    }

    /// Mutable array under `key`, created as an empty array when absent.
    /// Fails when the existing value is not an array.
    pub fn ensure_array(&mut self, key: &str) -> Result<&mut PhpValue, DomainError> {
        if self.get(key).is_none() {
            self.insert(key, PhpValue::array());
        }
        match self.get_mut(key) {
            Some(value @ PhpValue::Array(_)) => Ok(value),
            _ => Err(DomainError::parse(
                "config document",
                format!("'{key}' is not an array"),
            )),
        }
    }

    /// Does a list-style array contain this string element?
    pub fn contains_string(&self, needle: &str) -> bool {
        match self {
            Self::Array(entries) => entries
                .iter()
                .any(|e| matches!(&e.value, PhpValue::String(s) if s == needle)),
            _ => false,
        }
    }

    /// Render this value as a PHP literal, `array(...)` style, indented
    /// `depth` levels.
    pub fn export(&self, depth: usize) -> String {
        match self {
            Self::String(s) => format!("'{}'", escape_single_quoted(s)),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(true) => "true".into(),
            Self::Bool(false) => "false".into(),
            Self::Null => "null".into(),
            Self::Raw(expr) => expr.clone(),
            Self::Array(entries) => {
                if entries.is_empty() {
                    return "array(\n".to_string() + &"    ".repeat(depth) + ")";
                }
                let pad = "    ".repeat(depth + 1);
                let mut out = String::from("array(\n");
                for entry in entries {
                    out.push_str(&pad);
                    if let Some(key) = &entry.key {
                        match key {
                            PhpKey::Str(s) => {
                                out.push_str(&format!("'{}'", escape_single_quoted(s)))
                            }
                            PhpKey::Int(i) => out.push_str(&i.to_string()),
                        }
                        out.push_str(" => ");
                    }
                    out.push_str(&entry.value.export(depth + 1));
                    out.push_str(",\n");
                }
                out.push_str(&"    ".repeat(depth));
                out.push(')');
                out
            }
        }
    }
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

// ── Mutators ──────────────────────────────────────────────────────────────────

/// Append `module_name` to the document's `modules` list. Set semantics:
/// returns `false` (and leaves the document untouched) when the module is
/// already registered; new entries go last.
pub fn add_module_entry(document: &mut PhpValue, module_name: &str) -> Result<bool, DomainError> {
    let modules = document.ensure_array("modules")?;
    if modules.contains_string(module_name) {
        return Ok(false);
    }
    modules.push(PhpValue::String(module_name.to_string()));
    Ok(true)
}

/// Register a controller as an invokable in a module config:
/// `controllers.invokables.<alias> => <class>`. Set semantics on the alias.
pub fn add_invokable_entry(
    document: &mut PhpValue,
    alias: &str,
    class: &str,
) -> Result<bool, DomainError> {
    let invokables = document
        .ensure_array("controllers")?
        .ensure_array("invokables")?;
    if invokables.get(alias).is_some() {
        return Ok(false);
    }
    invokables.insert(alias, PhpValue::String(class.to_string()));
    Ok(true)
}

/// Register a literal route for a controller under `router.routes`.
/// Set semantics on the route name.
pub fn add_literal_route(
    document: &mut PhpValue,
    route_name: &str,
    route: &str,
    controller_alias: &str,
) -> Result<bool, DomainError> {
    let routes = document.ensure_array("router")?.ensure_array("routes")?;
    if routes.get(route_name).is_some() {
        return Ok(false);
    }

    let mut defaults = PhpValue::array();
    defaults.insert("controller", PhpValue::String(controller_alias.to_string()));
    defaults.insert("action", PhpValue::String("index".to_string()));

    let mut options = PhpValue::array();
    options.insert("route", PhpValue::String(route.to_string()));
    options.insert("defaults", defaults);

    let mut entry = PhpValue::array();
    entry.insert("type", PhpValue::String("Literal".to_string()));
    entry.insert("options", options);

    routes.insert(route_name, entry);
    Ok(true)
}

/// Initial content of a freshly scaffolded module config: an empty
/// invokables map and a view-manager template path stack pointing at the
/// module's view directory.
pub fn initial_module_config(module_view_dir: &str) -> PhpValue {
    let mut controllers = PhpValue::array();
    controllers.insert("invokables", PhpValue::array());

    let mut stack = PhpValue::array();
    stack.insert(module_view_dir, PhpValue::Raw("__DIR__ . '/../view'".into()));
    let mut view_manager = PhpValue::array();
    view_manager.insert("template_path_stack", stack);

    let mut document = PhpValue::array();
    document.insert("controllers", controllers);
    document.insert("view_manager", view_manager);
    document
}
