//! Integration tests for synthesize / parse / merge across the public API.

use mvcforge_core::domain::{
    ClassDoc, ClassModel, ConflictKind, DocBlock, DocPolicy, DomainError, MethodModel, MethodNode,
    merge_method, parse_class_file, render_class_file,
    source::{ABSTRACT_CONTROLLER, ABSTRACT_CONTROLLER_IMPORT, VIEW_MODEL_IMPORT},
};

fn controller_file(policy: DocPolicy) -> String {
    let class = ClassModel {
        namespace: "Blog\\Controller".into(),
        imports: vec![
            ABSTRACT_CONTROLLER_IMPORT.to_string(),
            VIEW_MODEL_IMPORT.to_string(),
        ],
        doc: ClassDoc::Generated(DocBlock::new("Class IndexController")),
        name: "IndexController".into(),
        parent: Some(ABSTRACT_CONTROLLER.to_string()),
        methods: vec![MethodNode::Generated(MethodModel::public(
            "indexAction",
            "return new ViewModel();",
        ))],
    };
    render_class_file(&class, Some(&DocBlock::new("Generated test fixture")), policy)
}

fn method_span(file: &str, name: &str) -> String {
    let parsed = parse_class_file(file, "IndexController.php").unwrap();
    parsed
        .methods
        .into_iter()
        .find(|m| m.name == name)
        .map(|m| m.text)
        .expect("method present")
}

#[test]
fn generated_file_parses_back_to_the_same_shape() {
    let file = controller_file(DocPolicy::Emit);
    let parsed = parse_class_file(&file, "IndexController.php").unwrap();
    assert_eq!(parsed.namespace, "Blog\\Controller");
    assert_eq!(parsed.class_name, "IndexController");
    assert_eq!(parsed.parent.as_deref(), Some(ABSTRACT_CONTROLLER));
    assert_eq!(parsed.methods.len(), 1);
    assert_eq!(parsed.methods[0].name, "indexAction");
}

#[test]
fn merge_appends_and_preserves_existing_method_bytes() {
    let original = controller_file(DocPolicy::Emit);
    let before = method_span(&original, "indexAction");

    let merged = merge_method(
        &original,
        "IndexController.php",
        "IndexController",
        MethodModel::public("aboutAction", "return new ViewModel();"),
        DocPolicy::Emit,
    )
    .unwrap();

    assert_eq!(method_span(&merged, "indexAction"), before);
    // The raw file bytes must carry the span too, class-body indentation
    // included, not just the re-parsed view of it.
    assert!(before.starts_with("    public function indexAction"));
    assert!(merged.contains(&before));
    assert!(merged.contains("{\n    public function indexAction"));
    let parsed = parse_class_file(&merged, "IndexController.php").unwrap();
    assert_eq!(
        parsed.methods.last().map(|m| m.name.as_str()),
        Some("aboutAction")
    );
}

#[test]
fn second_merge_of_same_method_conflicts_and_changes_nothing() {
    let original = controller_file(DocPolicy::Emit);
    let once = merge_method(
        &original,
        "IndexController.php",
        "IndexController",
        MethodModel::public("showAction", "return new ViewModel();"),
        DocPolicy::Emit,
    )
    .unwrap();

    let err = merge_method(
        &once,
        "IndexController.php",
        "IndexController",
        MethodModel::public("showAction", "return new ViewModel();"),
        DocPolicy::Emit,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict {
            kind: ConflictKind::ActionMethod,
            ..
        }
    ));
}

#[test]
fn hand_edited_body_survives_a_merge() {
    let original = controller_file(DocPolicy::Emit);
    let edited = original.replace(
        "return new ViewModel();",
        "$model = new ViewModel();\n        return $model;",
    );

    let merged = merge_method(
        &edited,
        "IndexController.php",
        "IndexController",
        MethodModel::public("aboutAction", "return new ViewModel();"),
        DocPolicy::Emit,
    )
    .unwrap();
    assert!(merged.contains("$model = new ViewModel();"));
}

#[test]
fn suppressed_docblock_file_can_still_be_merged() {
    let original = controller_file(DocPolicy::Suppress);
    assert!(!original.contains("/**"));

    let merged = merge_method(
        &original,
        "IndexController.php",
        "IndexController",
        MethodModel::public("aboutAction", "return new ViewModel();"),
        DocPolicy::Suppress,
    )
    .unwrap();
    let parsed = parse_class_file(&merged, "IndexController.php").unwrap();
    assert_eq!(parsed.methods.len(), 2);
}

#[test]
fn wrong_class_name_is_a_parse_error() {
    let original = controller_file(DocPolicy::Emit);
    let err = merge_method(
        &original,
        "IndexController.php",
        "AdminController",
        MethodModel::public("aboutAction", "return new ViewModel();"),
        DocPolicy::Emit,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Parse { .. }));
}
