//! End-to-end tests for the mvcforge binary.
//!
//! Everything here drives the compiled CLI against real temp directories;
//! the skeleton bootstrap is not exercised because it needs the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const APP_CONFIG: &str = "<?php\n\
return array(\n\
\x20   'modules' => array(\n\
\x20       'Application',\n\
\x20   ),\n\
);\n";

fn mvcforge() -> Command {
    let mut cmd = Command::cargo_bin("mvcforge").unwrap();
    // Keep assertions stable regardless of the invoking terminal.
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Lay down the minimal tree the preflight check requires.
fn seed_project(root: &Path) {
    fs::create_dir_all(root.join("module")).unwrap();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config/application.config.php"), APP_CONFIG).unwrap();
}

// ---- surface ----------------------------------------------------------------

#[test]
fn help_lists_create_and_completions() {
    mvcforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_matches_cargo() {
    mvcforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_color_env_value_is_not_parsed_as_a_flag_argument() {
    // no-color.org mandates honouring NO_COLOR regardless of its value;
    // it must never reach clap as a boolean to validate.
    let project = TempDir::new().unwrap();
    seed_project(project.path());
    Command::cargo_bin("mvcforge")
        .unwrap()
        .env("NO_COLOR", "1")
        .current_dir(project.path())
        .args(["create", "module", "Shop"])
        .assert()
        .success();
}

#[test]
fn create_module_requires_a_name() {
    mvcforge()
        .args(["create", "module"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn completions_bash_mentions_binary() {
    mvcforge()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mvcforge"));
}

#[test]
fn missing_explicit_config_file_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["--config", "/nonexistent/mvcforge.toml", "create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("config file not found"));
}

// ---- create module ----------------------------------------------------------

#[test]
fn create_module_outside_a_project_exits_3() {
    let temp = TempDir::new().unwrap();

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No application found"));
}

#[test]
fn create_module_scaffolds_and_registers() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Module 'Blog' created"));

    let module = temp.path().join("module/Blog");
    assert!(module.join("Module.php").is_file());
    assert!(module.join("config/module.config.php").is_file());
    assert!(module.join("src/Blog/Controller").is_dir());
    assert!(module.join("view/blog").is_dir());

    let app_config = fs::read_to_string(temp.path().join("config/application.config.php")).unwrap();
    assert!(app_config.contains("'Blog',"));

    // The prior list was preserved next to the rewritten file.
    let backup =
        fs::read_to_string(temp.path().join("config/application.config.old")).unwrap();
    assert_eq!(backup, APP_CONFIG);
}

#[test]
fn create_module_twice_exits_3() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn create_module_quiet_produces_no_stdout() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["--quiet", "create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_output_format_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["--output-format", "json", "create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"module\":\"Blog\""))
        .stdout(predicate::str::contains("\"registration\""));
}

#[test]
fn dashed_module_name_is_camel_cased() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "my-shop"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MyShop"));

    assert!(temp.path().join("module/MyShop/Module.php").is_file());
}

// ---- create controller ------------------------------------------------------

#[test]
fn create_controller_writes_class_and_view() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("IndexController"));

    let file = temp
        .path()
        .join("module/Blog/src/Blog/Controller/IndexController.php");
    let text = fs::read_to_string(&file).unwrap();
    assert!(text.contains("class IndexController extends AbstractActionController"));
    assert!(text.contains("public function indexAction()"));

    assert!(temp.path().join("module/Blog/view/blog/index/index.phtml").is_file());

    // Registered as an invokable in the module config.
    let module_config =
        fs::read_to_string(temp.path().join("module/Blog/config/module.config.php")).unwrap();
    assert!(module_config.contains("Blog\\\\Controller\\\\IndexController"));
}

#[test]
fn create_controller_no_config_skips_registration() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    let config_path = temp.path().join("module/Blog/config/module.config.php");
    let before = fs::read_to_string(&config_path).unwrap();

    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .arg("--no-config")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&config_path).unwrap(), before);
}

#[test]
fn create_controller_single_route_registers_route() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .arg("--single-route")
        .assert()
        .success();

    let module_config =
        fs::read_to_string(temp.path().join("module/Blog/config/module.config.php")).unwrap();
    assert!(module_config.contains("'router'"));
    assert!(module_config.contains("'/blog/index'"));
}

#[test]
fn no_docblocks_strips_comments() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .arg("--no-docblocks")
        .assert()
        .success();

    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .arg("--no-docblocks")
        .assert()
        .success();

    let file = temp
        .path()
        .join("module/Blog/src/Blog/Controller/IndexController.php");
    let text = fs::read_to_string(&file).unwrap();
    assert!(!text.contains("/**"));
}

// ---- create action ----------------------------------------------------------

#[test]
fn create_action_appends_method_and_view() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();
    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    mvcforge()
        .args(["create", "action", "show-all", "Index", "Blog"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("showAllAction"));

    let file = temp
        .path()
        .join("module/Blog/src/Blog/Controller/IndexController.php");
    let text = fs::read_to_string(&file).unwrap();
    assert!(text.contains("public function indexAction()"));
    assert!(text.contains("public function showAllAction()"));
    // The new method lands after the existing one.
    assert!(text.find("indexAction").unwrap() < text.find("showAllAction").unwrap());

    assert!(temp
        .path()
        .join("module/Blog/view/blog/index/show-all.phtml")
        .is_file());
}

#[test]
fn duplicate_action_exits_3_and_leaves_file_alone() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();
    mvcforge()
        .args(["create", "controller", "Index", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    let file = temp
        .path()
        .join("module/Blog/src/Blog/Controller/IndexController.php");
    let before = fs::read_to_string(&file).unwrap();

    mvcforge()
        .args(["create", "action", "index", "Index", "Blog"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn create_action_on_missing_controller_exits_2() {
    let temp = TempDir::new().unwrap();
    seed_project(temp.path());

    mvcforge()
        .args(["create", "module", "Blog"])
        .arg(temp.path())
        .assert()
        .success();

    mvcforge()
        .args(["create", "action", "show", "Missing", "Blog"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(2);
}
