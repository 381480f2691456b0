//! Structural model of a generated source file.
//!
//! The model is deliberately shallow: namespace, imports, one class, and an
//! ordered method list. Method bodies are opaque text and are never
//! interpreted, which is what makes verbatim round-tripping possible.
//! Anything outside this shape is a parse error, never a guess.

pub mod merge;
pub mod parser;
pub mod synthesizer;

pub use merge::merge_method;
pub use parser::{ParsedClassFile, parse_class_file};
pub use synthesizer::{
    render_class_file, render_config_file, render_raw_file, render_view_script,
};

/// Import pulled in for every generated controller.
pub const ABSTRACT_CONTROLLER_IMPORT: &str = "Zend\\Mvc\\Controller\\AbstractActionController";
/// Parent class hint used in `extends` clauses.
pub const ABSTRACT_CONTROLLER: &str = "AbstractActionController";
/// Import for the view model returned by generated actions.
pub const VIEW_MODEL_IMPORT: &str = "Zend\\View\\Model\\ViewModel";
/// Project link placed in generated `@see` tags.
pub const TOOL_LINK: &str = "https://github.com/mvcforge/mvcforge";

/// Whether generated doc comments are emitted.
///
/// One policy value threaded through every render call; there is no global
/// flag and no per-call-site conditional emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocPolicy {
    Emit,
    Suppress,
}

impl DocPolicy {
    /// Policy from the user-facing `--no-docblocks` flag.
    pub fn from_no_docblocks(no_docblocks: bool) -> Self {
        if no_docblocks {
            Self::Suppress
        } else {
            Self::Emit
        }
    }

    pub fn emits(self) -> bool {
        matches!(self, Self::Emit)
    }
}

/// A `@name text` doc tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub text: String,
}

impl DocTag {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A doc comment to be rendered: one summary line, an optional longer
/// description, and trailing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub summary: String,
    pub description: Option<String>,
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: None,
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn tag(mut self, name: &str, text: impl Into<String>) -> Self {
        self.tags.push(DocTag::new(name, text));
        self
    }
}

/// PHP method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// A method authored by this engine in the current invocation.
///
/// `body` is opaque text without indentation; the renderer indents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    pub name: String,
    pub visibility: Visibility,
    pub body: String,
    pub doc: Option<DocBlock>,
}

impl MethodModel {
    pub fn public(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            body: body.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: DocBlock) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A method recovered from an existing file. `text` is the exact original
/// span, including its own doc comment and indentation, and is reproduced
/// byte-for-byte on re-serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbatimMethod {
    pub name: String,
    pub visibility: Visibility,
    pub text: String,
}

/// One entry in a class's ordered method list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodNode {
    /// Rendered from a [`MethodModel`] under the active [`DocPolicy`].
    Generated(MethodModel),
    /// Reproduced exactly as parsed, regardless of policy.
    Verbatim(VerbatimMethod),
}

impl MethodNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Generated(m) => &m.name,
            Self::Verbatim(m) => &m.name,
        }
    }
}

/// Doc comment attached to a class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassDoc {
    None,
    /// Newly generated; subject to the doc policy.
    Generated(DocBlock),
    /// Recovered from an existing file; kept verbatim, policy or not.
    Verbatim(String),
}

/// One class with its namespace context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    pub namespace: String,
    pub imports: Vec<String>,
    pub doc: ClassDoc,
    pub name: String,
    pub parent: Option<String>,
    pub methods: Vec<MethodNode>,
}

impl ClassModel {
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name() == name)
    }

    /// Append `import` unless already present. Order of existing imports is
    /// preserved; new ones go last.
    pub fn ensure_import(&mut self, import: &str) {
        if !self.imports.iter().any(|i| i == import) {
            self.imports.push(import.to_string());
        }
    }

    /// First namespace segment, the module a generated file belongs to.
    pub fn package_hint(&self) -> &str {
        self.namespace
            .split('\\')
            .next()
            .unwrap_or(self.namespace.as_str())
    }
}
