//! Path and name resolution.
//!
//! [`resolve`] is a pure function from a [`ScaffoldRequest`] to a
//! [`ResolvedNames`]: same request in, same names out, every time. All
//! filesystem paths the generators touch are derived here and nowhere else.
//!
//! Derivation rules:
//!
//! - module:     `<root>/module/<ModuleName>`, view dir `lower-dash(name)`
//! - controller: class `<Name>Controller`, file `<class>.php`, source dir
//!   `<modulePath>/src/<Module>/Controller/`, views under
//!   `<modulePath>/view/<module-view-dir>/<lower-dash(name)>`
//! - action:     method `lowerFirst(name) + "Action"`, view file
//!   `lower-dash(name) + ".phtml"`
//!
//! An action needs a resolved controller, a controller needs a resolved
//! module; a missing prerequisite is a validation error.

use serde::Serialize;
use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::naming;
use crate::domain::request::ScaffoldRequest;

/// Extension for generated class files.
pub const SOURCE_EXT: &str = ".php";
/// Extension for generated view scripts.
pub const VIEW_EXT: &str = ".phtml";

/// Every name and path derived from one request. Computed once per command,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNames {
    pub root: PathBuf,
    pub module: Option<ModuleNames>,
    pub controller: Option<ControllerNames>,
    pub action: Option<ActionNames>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleNames {
    /// Canonical module name, e.g. `Blog`.
    pub name: String,
    /// `<root>/module/<name>`
    pub path: PathBuf,
    /// Lower-dash view directory name, e.g. `my-blog`.
    pub view_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerNames {
    /// Canonical controller name, e.g. `Index`.
    pub name: String,
    /// `IndexController`
    pub class: String,
    /// `IndexController.php`
    pub file: String,
    /// `<modulePath>/src/<Module>/Controller`
    pub dir: PathBuf,
    /// `<modulePath>/view/<module-view-dir>/<controller-dash>`
    pub view_path: PathBuf,
}

impl ControllerNames {
    /// Full path of the controller source file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionNames {
    /// Canonical action name, e.g. `Show`.
    pub name: String,
    /// `showAction`
    pub method: String,
    /// `show.phtml`
    pub view_file: String,
    /// `<controllerViewPath>/show.phtml`
    pub view_path: PathBuf,
}

impl ResolvedNames {
    /// Module names, or a validation error if the command had none.
    pub fn require_module(&self) -> Result<&ModuleNames, DomainError> {
        self.module
            .as_ref()
            .ok_or_else(|| DomainError::validation("a module name is required"))
    }

    /// Controller names, or a validation error.
    pub fn require_controller(&self) -> Result<&ControllerNames, DomainError> {
        self.controller
            .as_ref()
            .ok_or_else(|| DomainError::validation("a controller name is required"))
    }

    /// Action names, or a validation error.
    pub fn require_action(&self) -> Result<&ActionNames, DomainError> {
        self.action
            .as_ref()
            .ok_or_else(|| DomainError::validation("an action name is required"))
    }
}

/// Resolve every derived name and path for a request.
pub fn resolve(request: &ScaffoldRequest) -> Result<ResolvedNames, DomainError> {
    let root = request.path.clone();

    let module = match &request.module {
        Some(raw) => Some(resolve_module(&root, raw, request.ignore_conventions)?),
        None => None,
    };

    let controller = match &request.controller {
        Some(raw) => {
            let module = module.as_ref().ok_or_else(|| {
                DomainError::validation("cannot resolve a controller without a module name")
            })?;
            Some(resolve_controller(module, raw, request.ignore_conventions)?)
        }
        None => None,
    };

    let action = match &request.action {
        Some(raw) => {
            let controller = controller.as_ref().ok_or_else(|| {
                DomainError::validation("cannot resolve an action without a controller name")
            })?;
            Some(resolve_action(controller, raw, request.ignore_conventions)?)
        }
        None => None,
    };

    Ok(ResolvedNames {
        root,
        module,
        controller,
        action,
    })
}

fn resolve_module(
    root: &PathBuf,
    raw: &str,
    ignore_conventions: bool,
) -> Result<ModuleNames, DomainError> {
    let name = class_style(raw, ignore_conventions)?;
    let view_dir = view_style(&name);
    let path = root.join("module").join(&name);
    Ok(ModuleNames {
        name,
        path,
        view_dir,
    })
}

fn resolve_controller(
    module: &ModuleNames,
    raw: &str,
    ignore_conventions: bool,
) -> Result<ControllerNames, DomainError> {
    let name = class_style(raw, ignore_conventions)?;
    let class = format!("{name}Controller");
    let file = format!("{class}{SOURCE_EXT}");
    let dir = module
        .path
        .join("src")
        .join(&module.name)
        .join("Controller");
    let view_path = module
        .path
        .join("view")
        .join(&module.view_dir)
        .join(view_style(&name));
    Ok(ControllerNames {
        name,
        class,
        file,
        dir,
        view_path,
    })
}

fn resolve_action(
    controller: &ControllerNames,
    raw: &str,
    ignore_conventions: bool,
) -> Result<ActionNames, DomainError> {
    let name = class_style(raw, ignore_conventions)?;
    let method = format!("{}Action", naming::lower_first(&name));
    let view_file = format!("{}{VIEW_EXT}", view_style(&name));
    let view_path = controller.view_path.join(&view_file);
    Ok(ActionNames {
        name,
        method,
        view_file,
        view_path,
    })
}

/// Class-style identifier derivation: convention mode camel-cases
/// underscore and dash separators; literal mode only swaps dashes for
/// underscores.
fn class_style(raw: &str, ignore_conventions: bool) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("identifier must not be empty"));
    }
    let name = if ignore_conventions {
        naming::dash_to_underscore(trimmed)
    } else {
        naming::dash_to_camel(&naming::underscore_to_camel(trimmed))
    };
    Ok(name)
}

/// View-path derivation: always lower-dash, independent of convention mode.
fn view_style(name: &str) -> String {
    naming::to_lower(&naming::camel_to_dash(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> ScaffoldRequest {
        ScaffoldRequest::at("/app")
            .module("blog")
            .controller("index")
            .action("show")
    }

    #[test]
    fn resolution_is_deterministic() {
        let req = full_request();
        assert_eq!(resolve(&req).unwrap(), resolve(&req).unwrap());
    }

    #[test]
    fn module_paths_follow_convention() {
        let names = resolve(&ScaffoldRequest::at("/app").module("my_blog")).unwrap();
        let module = names.module.unwrap();
        assert_eq!(module.name, "MyBlog");
        assert_eq!(module.path, PathBuf::from("/app/module/MyBlog"));
        assert_eq!(module.view_dir, "my-blog");
    }

    #[test]
    fn controller_derivation() {
        let names = resolve(&full_request()).unwrap();
        let controller = names.controller.unwrap();
        assert_eq!(controller.class, "IndexController");
        assert_eq!(controller.file, "IndexController.php");
        assert_eq!(
            controller.dir,
            PathBuf::from("/app/module/Blog/src/Blog/Controller")
        );
        assert_eq!(
            controller.view_path,
            PathBuf::from("/app/module/Blog/view/blog/index")
        );
    }

    #[test]
    fn action_derivation() {
        let names = resolve(&full_request()).unwrap();
        let action = names.action.unwrap();
        assert_eq!(action.name, "Show");
        assert_eq!(action.method, "showAction");
        assert_eq!(action.view_file, "show.phtml");
        assert_eq!(
            action.view_path,
            PathBuf::from("/app/module/Blog/view/blog/index/show.phtml")
        );
    }

    #[test]
    fn dash_and_underscore_inputs_agree() {
        let a = resolve(&ScaffoldRequest::at(".").module("foo-bar")).unwrap();
        let b = resolve(&ScaffoldRequest::at(".").module("foo_bar")).unwrap();
        assert_eq!(a.module.unwrap().name, b.module.unwrap().name);
    }

    #[test]
    fn literal_mode_preserves_casing() {
        let req = ScaffoldRequest::at(".")
            .module("my-odd_Casing")
            .ignore_conventions(true);
        let module = resolve(&req).unwrap().module.unwrap();
        assert_eq!(module.name, "my_odd_Casing");
        // View derivation stays lowercased even in literal mode; the
        // underscore already separates words, so no dash is added.
        assert_eq!(module.view_dir, "my_odd_casing");
    }

    #[test]
    fn controller_without_module_is_validation_error() {
        let mut req = ScaffoldRequest::at(".");
        req.controller = Some("Index".into());
        assert!(matches!(
            resolve(&req),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn action_without_controller_is_validation_error() {
        let mut req = ScaffoldRequest::at(".").module("Blog");
        req.action = Some("show".into());
        assert!(matches!(resolve(&req), Err(DomainError::Validation(_))));
    }

    #[test]
    fn empty_identifier_is_validation_error() {
        let req = ScaffoldRequest::at(".").module("   ");
        assert!(matches!(resolve(&req), Err(DomainError::Validation(_))));
    }

    #[test]
    fn multi_word_action_method() {
        let req = ScaffoldRequest::at(".")
            .module("Blog")
            .controller("Index")
            .action("show_all-posts");
        let action = resolve(&req).unwrap().action.unwrap();
        assert_eq!(action.method, "showAllPostsAction");
        assert_eq!(action.view_file, "show-all-posts.phtml");
    }
}
