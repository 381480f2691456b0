//! Source text rendering.
//!
//! Pure functions over the model: no filesystem access, no hidden state.
//! The same model and policy always render to identical text, which is what
//! makes round-trip testing of the merger tractable.

use crate::domain::config::PhpValue;
use crate::domain::source::{ClassDoc, ClassModel, DocBlock, DocPolicy, MethodModel, MethodNode};

const INDENT: &str = "    ";

/// Render a complete class file: `<?php`, optional file header doc,
/// namespace, imports, class.
pub fn render_class_file(
    class: &ClassModel,
    file_doc: Option<&DocBlock>,
    policy: DocPolicy,
) -> String {
    let mut out = String::from("<?php\n");

    if policy.emits() {
        if let Some(doc) = file_doc {
            out.push_str(&render_docblock(doc, 0));
        }
    }
    out.push('\n');

    out.push_str(&format!("namespace {};\n", class.namespace));

    if !class.imports.is_empty() {
        out.push('\n');
        for import in &class.imports {
            out.push_str(&format!("use {import};\n"));
        }
    }

    out.push('\n');
    match &class.doc {
        ClassDoc::Generated(doc) if policy.emits() => {
            out.push_str(&render_docblock(doc, 0));
        }
        ClassDoc::Verbatim(text) => {
            out.push_str(text.trim_end());
            out.push('\n');
        }
        _ => {}
    }

    out.push_str(&format!("class {}", class.name));
    if let Some(parent) = &class.parent {
        out.push_str(&format!(" extends {parent}"));
    }
    out.push_str("\n{\n");

    let rendered: Vec<String> = class
        .methods
        .iter()
        .map(|m| render_method_node(m, policy))
        .collect();
    out.push_str(&rendered.join("\n\n"));
    if !rendered.is_empty() {
        out.push('\n');
    }

    out.push_str("}\n");
    out
}

/// Render a non-class PHP file from an opaque body, e.g. a config file.
pub fn render_raw_file(body: &str, file_doc: Option<&DocBlock>, policy: DocPolicy) -> String {
    let mut out = String::from("<?php\n");
    if policy.emits() {
        if let Some(doc) = file_doc {
            out.push_str(&render_docblock(doc, 0));
        }
    }
    out.push('\n');
    out.push_str(body.trim_end());
    out.push('\n');
    out
}

/// Render a config document as `return <literal>;`, with an optional
/// header comment.
pub fn render_config_file(
    document: &PhpValue,
    file_doc: Option<&DocBlock>,
    policy: DocPolicy,
) -> String {
    let body = format!("return {};", document.export(0));
    render_raw_file(&body, file_doc, policy)
}

/// Render a view script: optional docblock header in a PHP prologue,
/// followed by the markup body.
pub fn render_view_script(
    action_name: &str,
    controller_name: &str,
    module_name: &str,
    policy: DocPolicy,
) -> String {
    let mut out = String::new();

    if policy.emits() {
        let doc = DocBlock::new("View script generated by mvcforge").tag("package", module_name);
        out.push_str("<?php\n");
        out.push_str(&render_docblock(&doc, 0));
        out.push_str("?>\n");
    }

    out.push_str("<div class=\"jumbotron\">\n");
    out.push_str(&format!("    <h1>Action \"{action_name}\"</h1>\n"));
    out.push_str(&format!(
        "    <p>Created for Controller \"{controller_name}\" in Module \"{module_name}\"</p>\n"
    ));
    out.push_str("</div>\n");
    out
}

/// Render one method at class-body indentation.
pub fn render_method(method: &MethodModel, policy: DocPolicy) -> String {
    let mut out = String::new();

    if policy.emits() {
        if let Some(doc) = &method.doc {
            out.push_str(&render_docblock(doc, 1));
        }
    }

    out.push_str(&format!(
        "{INDENT}{} function {}()\n{INDENT}{{\n",
        method.visibility.as_str(),
        method.name
    ));
    for line in method.body.trim_end().lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{INDENT}{INDENT}{line}\n"));
        }
    }
    out.push_str(&format!("{INDENT}}}"));
    out
}

fn render_method_node(node: &MethodNode, policy: DocPolicy) -> String {
    match node {
        MethodNode::Generated(method) => render_method(method, policy),
        // Trailing whitespace is normalised; everything else is exact.
        MethodNode::Verbatim(method) => method.text.trim_end().to_string(),
    }
}

/// `/** ... */` rendering at the given indent depth (0 = file level,
/// 1 = class member).
pub fn render_docblock(doc: &DocBlock, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut out = format!("{pad}/**\n");
    out.push_str(&format!("{pad} * {}\n", doc.summary));

    if let Some(description) = &doc.description {
        out.push_str(&format!("{pad} *\n"));
        for line in description.lines() {
            out.push_str(&format!("{pad} * {line}\n"));
        }
    }
    if !doc.tags.is_empty() {
        out.push_str(&format!("{pad} *\n"));
        for tag in &doc.tags {
            out.push_str(&format!("{pad} * @{} {}\n", tag.name, tag.text));
        }
    }
    out.push_str(&format!("{pad} */\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::{ClassDoc, Visibility};

    fn sample_class() -> ClassModel {
        ClassModel {
            namespace: "Blog\\Controller".into(),
            imports: vec![
                "Zend\\Mvc\\Controller\\AbstractActionController".into(),
                "Zend\\View\\Model\\ViewModel".into(),
            ],
            doc: ClassDoc::Generated(
                DocBlock::new("Class IndexController")
                    .description("Please add a proper description for the IndexController")
                    .tag("package", "Blog"),
            ),
            name: "IndexController".into(),
            parent: Some("AbstractActionController".into()),
            methods: vec![MethodNode::Generated(
                MethodModel::public("indexAction", "return new ViewModel();").doc(
                    DocBlock::new("Method indexAction")
                        .description("Please add a proper description for this action")
                        .tag("return", "ViewModel"),
                ),
            )],
        }
    }

    #[test]
    fn class_file_contains_expected_sections() {
        let text = render_class_file(&sample_class(), None, DocPolicy::Emit);
        assert!(text.starts_with("<?php\n"));
        assert!(text.contains("namespace Blog\\Controller;"));
        assert!(text.contains("use Zend\\View\\Model\\ViewModel;"));
        assert!(text.contains("class IndexController extends AbstractActionController"));
        assert!(text.contains("public function indexAction()"));
        assert!(text.contains("return new ViewModel();"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn suppress_policy_removes_all_docblocks() {
        let text = render_class_file(&sample_class(), None, DocPolicy::Suppress);
        assert!(!text.contains("/**"));
        assert!(text.contains("public function indexAction()"));
    }

    #[test]
    fn file_docblock_emitted_only_under_emit_policy() {
        let doc = DocBlock::new("This file was generated by mvcforge.").tag("package", "Blog");
        let with = render_class_file(&sample_class(), Some(&doc), DocPolicy::Emit);
        let without = render_class_file(&sample_class(), Some(&doc), DocPolicy::Suppress);
        assert!(with.contains("This file was generated by mvcforge."));
        assert!(!without.contains("This file was generated"));
    }

    #[test]
    fn verbatim_method_is_reproduced_exactly() {
        let original = "    /** hand-written */\n    public function oddAction()\n    {\n        return 42; // tweaked by hand\n    }";
        let mut class = sample_class();
        class.methods = vec![MethodNode::Verbatim(super::super::VerbatimMethod {
            name: "oddAction".into(),
            visibility: Visibility::Public,
            text: original.into(),
        })];
        let text = render_class_file(&class, None, DocPolicy::Suppress);
        assert!(text.contains(original));
    }

    #[test]
    fn method_body_is_indented_two_levels() {
        let method = MethodModel::public("indexAction", "return new ViewModel();");
        let text = render_method(&method, DocPolicy::Suppress);
        assert_eq!(
            text,
            "    public function indexAction()\n    {\n        return new ViewModel();\n    }"
        );
    }

    #[test]
    fn docblock_layout() {
        let doc = DocBlock::new("Summary")
            .description("Longer text")
            .tag("return", "ViewModel");
        assert_eq!(
            render_docblock(&doc, 0),
            "/**\n * Summary\n *\n * Longer text\n *\n * @return ViewModel\n */\n"
        );
    }

    #[test]
    fn view_script_modes() {
        let with = render_view_script("Show", "Index", "Blog", DocPolicy::Emit);
        assert!(with.starts_with("<?php\n/**\n"));
        assert!(with.contains("?>\n<div class=\"jumbotron\">"));
        assert!(with.contains("Action \"Show\""));

        let without = render_view_script("Show", "Index", "Blog", DocPolicy::Suppress);
        assert!(without.starts_with("<div class=\"jumbotron\">"));
        assert!(!without.contains("<?php"));
    }
}
