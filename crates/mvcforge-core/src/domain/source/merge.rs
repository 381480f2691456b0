//! Reflective merge: add a method to a previously generated class file.
//!
//! parse → model → serialize. Every existing method travels through the
//! pipeline as an opaque verbatim span, so hand-edited bodies come out
//! byte-identical. Only the method *list* is extended, never an existing
//! entry.

use crate::domain::error::{ConflictKind, DomainError};
use crate::domain::source::{
    ABSTRACT_CONTROLLER_IMPORT, ClassDoc, ClassModel, DocBlock, DocPolicy, MethodModel,
    MethodNode, TOOL_LINK, VIEW_MODEL_IMPORT,
    parser::parse_class_file,
    synthesizer::render_class_file,
};

/// Append `new_method` to the class in `existing`, returning the updated
/// file text.
///
/// Fails with:
/// - [`DomainError::Parse`] when the file does not contain a single
///   recognizable class named `expected_class`;
/// - [`DomainError::Conflict`] when a method with the same name is already
///   present (the caller must not write anything in that case).
///
/// Files generated under either doc policy are accepted; `policy` governs
/// only the new method and the regenerated file header.
pub fn merge_method(
    existing: &str,
    file_label: &str,
    expected_class: &str,
    new_method: MethodModel,
    policy: DocPolicy,
) -> Result<String, DomainError> {
    let parsed = parse_class_file(existing, file_label)?;

    if parsed.class_name != expected_class {
        return Err(DomainError::parse(
            file_label,
            format!(
                "expected class '{expected_class}', found '{}'",
                parsed.class_name
            ),
        ));
    }

    if parsed.methods.iter().any(|m| m.name == new_method.name) {
        return Err(DomainError::conflict(
            ConflictKind::ActionMethod,
            new_method.name,
        ));
    }

    let mut class = ClassModel {
        namespace: parsed.namespace,
        imports: parsed.imports,
        doc: match parsed.class_doc {
            Some(text) => ClassDoc::Verbatim(text),
            None => ClassDoc::None,
        },
        name: parsed.class_name,
        parent: parsed.parent,
        methods: parsed.methods.into_iter().map(MethodNode::Verbatim).collect(),
    };

    // Base-class hints must be importable by the new method's body.
    class.ensure_import(ABSTRACT_CONTROLLER_IMPORT);
    class.ensure_import(VIEW_MODEL_IMPORT);

    class.methods.push(MethodNode::Generated(new_method));

    let file_doc = DocBlock::new("This file was generated by mvcforge.")
        .tag("package", class.package_hint().to_string())
        .tag("see", TOOL_LINK);

    Ok(render_class_file(&class, Some(&file_doc), policy))
}
