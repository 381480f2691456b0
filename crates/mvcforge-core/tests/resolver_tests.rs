//! Integration tests for request resolution across the public API.

use std::path::PathBuf;

use mvcforge_core::domain::{DomainError, ScaffoldRequest, resolve};

#[test]
fn full_request_resolves_every_layer() {
    let request = ScaffoldRequest::at("/srv/app")
        .module("my_blog")
        .controller("admin-index")
        .action("show_all");
    let names = resolve(&request).unwrap();

    let module = names.module.unwrap();
    assert_eq!(module.name, "MyBlog");
    assert_eq!(module.path, PathBuf::from("/srv/app/module/MyBlog"));

    let controller = names.controller.unwrap();
    assert_eq!(controller.class, "AdminIndexController");
    assert_eq!(
        controller.file_path(),
        PathBuf::from("/srv/app/module/MyBlog/src/MyBlog/Controller/AdminIndexController.php")
    );

    let action = names.action.unwrap();
    assert_eq!(action.method, "showAllAction");
    assert_eq!(
        action.view_path,
        PathBuf::from("/srv/app/module/MyBlog/view/my-blog/admin-index/show-all.phtml")
    );
}

#[test]
fn repeated_resolution_is_identical() {
    let request = ScaffoldRequest::at(".")
        .module("Shop")
        .controller("Cart")
        .action("checkout");
    assert_eq!(resolve(&request).unwrap(), resolve(&request).unwrap());
}

#[test]
fn dash_and_underscore_spellings_converge() {
    let a = resolve(&ScaffoldRequest::at(".").module("foo-bar")).unwrap();
    let b = resolve(&ScaffoldRequest::at(".").module("foo_bar")).unwrap();
    assert_eq!(a.module.unwrap().name, b.module.unwrap().name);
}

#[test]
fn empty_path_defaults_to_current_directory() {
    let names = resolve(&ScaffoldRequest::at("").module("Blog")).unwrap();
    assert_eq!(names.root, PathBuf::from("."));
}

#[test]
fn literal_mode_keeps_view_paths_lower_dash() {
    let request = ScaffoldRequest::at(".")
        .module("Blog")
        .controller("AdminIndex")
        .ignore_conventions(true);
    let controller = resolve(&request).unwrap().controller.unwrap();
    assert!(controller.view_path.ends_with("Blog/view/blog/admin-index"));
}

#[test]
fn missing_prerequisites_are_validation_errors() {
    let mut only_controller = ScaffoldRequest::at(".");
    only_controller.controller = Some("Index".into());
    assert!(matches!(
        resolve(&only_controller),
        Err(DomainError::Validation(_))
    ));

    let mut no_controller = ScaffoldRequest::at(".").module("Blog");
    no_controller.action = Some("show".into());
    assert!(matches!(
        resolve(&no_controller),
        Err(DomainError::Validation(_))
    ));
}
