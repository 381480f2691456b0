//! Scaffold service - orchestrates module, controller, and action creation.
//!
//! Each use case follows the same shape:
//! 1. Resolve every derived name and path from the request (pure).
//! 2. Preflight the project tree and check for conflicts.
//! 3. Synthesize or merge source text (pure).
//! 4. Write through the filesystem port.
//!
//! Writes are not transactional across files. A failure mid-way leaves
//! already-written files in place; the conflict checks above make a re-run
//! safe.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        ConflictKind, DocBlock, DocPolicy, DomainError, ScaffoldRequest,
        add_invokable_entry, add_literal_route, add_module_entry, initial_module_config,
        merge_method, parse_config_document, render_class_file, render_config_file,
        render_view_script, resolve,
        source::{
            ABSTRACT_CONTROLLER, ABSTRACT_CONTROLLER_IMPORT, ClassDoc, ClassModel, MethodModel,
            MethodNode, TOOL_LINK, VIEW_MODEL_IMPORT,
        },
    },
    error::ForgeResult,
};

/// Outcome of a registration-document update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRegistration {
    /// The document was rewritten; the prior version is at `backup`.
    Updated { config: PathBuf, backup: PathBuf },
    /// The entry was already present; nothing written.
    AlreadyRegistered,
    /// Registration was disabled by the request.
    Skipped,
}

/// What `create_module` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    pub name: String,
    pub path: PathBuf,
    pub registration: ConfigRegistration,
}

/// What `create_controller` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerReport {
    pub class: String,
    pub file: PathBuf,
    pub view_script: PathBuf,
    pub registration: ConfigRegistration,
}

/// What `create_action` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub method: String,
    pub controller_file: PathBuf,
    pub view_script: PathBuf,
}

/// Main scaffolding service.
///
/// Owns the filesystem port; everything else it needs is pure domain code.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Scaffold a new module: directories, `Module.php`, an initial
    /// `module.config.php`, and registration in the application config.
    #[instrument(skip_all, fields(path = %request.path.display()))]
    pub fn create_module(&self, request: &ScaffoldRequest) -> ForgeResult<ModuleReport> {
        let names = resolve(request)?;
        let module = names.require_module()?;
        let policy = DocPolicy::from_no_docblocks(request.no_docblocks);

        self.preflight_project(&names.root)?;
        if self.filesystem.exists(&module.path) {
            return Err(DomainError::conflict(ConflictKind::Module, &module.name).into());
        }

        info!(module = %module.name, "Creating module");

        self.filesystem.create_dir_all(&module.path.join("config"))?;
        self.filesystem.create_dir_all(
            &module
                .path
                .join("src")
                .join(&module.name)
                .join("Controller"),
        )?;
        self.filesystem
            .create_dir_all(&module.path.join("view").join(&module.view_dir))?;

        let descriptor = render_class_file(
            &module_descriptor(&module.name),
            Some(&generated_file_doc(&module.name)),
            policy,
        );
        self.filesystem
            .write_file(&module.path.join("Module.php"), &descriptor)?;

        let module_config = render_config_file(
            &initial_module_config(&module.view_dir),
            Some(&config_header(None)),
            policy,
        );
        self.filesystem.write_file(
            &module.path.join("config").join("module.config.php"),
            &module_config,
        )?;

        let registration = self.register(
            &application_config_path(&names.root),
            policy,
            |doc| add_module_entry(doc, &module.name),
        )?;

        info!(module = %module.name, "Module created");
        Ok(ModuleReport {
            name: module.name.clone(),
            path: module.path.clone(),
            registration,
        })
    }

    /// Scaffold a controller inside an existing module: source file, default
    /// `index.phtml`, and an invokable entry in the module config.
    #[instrument(skip_all, fields(path = %request.path.display()))]
    pub fn create_controller(&self, request: &ScaffoldRequest) -> ForgeResult<ControllerReport> {
        let names = resolve(request)?;
        let module = names.require_module()?;
        let controller = names.require_controller()?;
        let policy = DocPolicy::from_no_docblocks(request.no_docblocks);

        self.preflight_project(&names.root)?;
        if !self.filesystem.is_dir(&module.path) {
            return Err(DomainError::validation(format!(
                "module '{}' does not exist at {}",
                module.name,
                module.path.display()
            ))
            .into());
        }
        let file = controller.file_path();
        if self.filesystem.exists(&file) {
            return Err(DomainError::conflict(ConflictKind::Controller, &controller.class).into());
        }

        info!(controller = %controller.class, module = %module.name, "Creating controller");

        let namespace = format!("{}\\Controller", module.name);
        let source = render_class_file(
            &controller_class(&namespace, &controller.class, &controller.name),
            Some(&generated_file_doc(&module.name)),
            policy,
        );
        self.filesystem.create_dir_all(&controller.dir)?;
        self.filesystem.write_file(&file, &source)?;

        let view_script = controller.view_path.join(format!("index{}", crate::domain::VIEW_EXT));
        self.filesystem.create_dir_all(&controller.view_path)?;
        self.filesystem.write_file(
            &view_script,
            &render_view_script("index", &controller.name, &module.name, policy),
        )?;

        let registration = if request.no_config {
            ConfigRegistration::Skipped
        } else {
            let alias = format!("{}\\Controller\\{}", module.name, controller.name);
            let class = format!("{}\\Controller\\{}", module.name, controller.class);
            let route_name = format!("{}-{}", module.view_dir, view_segment(&controller.view_path));
            let route = format!("/{}/{}", module.view_dir, view_segment(&controller.view_path));
            let single_route = request.single_route;
            self.register(
                &module.path.join("config").join("module.config.php"),
                policy,
                |doc| {
                    let mut changed = add_invokable_entry(doc, &alias, &class)?;
                    if single_route {
                        changed |= add_literal_route(doc, &route_name, &route, &alias)?;
                    }
                    Ok(changed)
                },
            )?
        };

        info!(controller = %controller.class, "Controller created");
        Ok(ControllerReport {
            class: controller.class.clone(),
            file,
            view_script,
            registration,
        })
    }

    /// Add an action method to an existing controller, plus its view script.
    /// The controller file is parsed and re-serialized; existing methods
    /// survive byte-for-byte.
    #[instrument(skip_all, fields(path = %request.path.display()))]
    pub fn create_action(&self, request: &ScaffoldRequest) -> ForgeResult<ActionReport> {
        let names = resolve(request)?;
        let module = names.require_module()?;
        let controller = names.require_controller()?;
        let action = names.require_action()?;
        let policy = DocPolicy::from_no_docblocks(request.no_docblocks);

        self.preflight_project(&names.root)?;
        let file = controller.file_path();
        if !self.filesystem.exists(&file) {
            return Err(DomainError::validation(format!(
                "controller '{}' does not exist in module '{}'",
                controller.class, module.name
            ))
            .into());
        }

        info!(method = %action.method, controller = %controller.class, "Adding action");

        let existing = self.filesystem.read_file(&file)?;
        let merged = merge_method(
            &existing,
            &controller.file,
            &controller.class,
            action_method(&action.method),
            policy,
        )?;
        self.filesystem.write_file(&file, &merged)?;

        self.filesystem.create_dir_all(&controller.view_path)?;
        self.filesystem.write_file(
            &action.view_path,
            &render_view_script(&action.name, &controller.name, &module.name, policy),
        )?;

        info!(method = %action.method, "Action added");
        Ok(ActionReport {
            method: action.method.clone(),
            controller_file: file,
            view_script: action.view_path.clone(),
        })
    }

    /// The target must already be a scaffolded application: a `module/`
    /// directory and `config/application.config.php`.
    fn preflight_project(&self, root: &Path) -> ForgeResult<()> {
        if self.filesystem.is_dir(&root.join("module"))
            && self.filesystem.exists(&application_config_path(root))
        {
            Ok(())
        } else {
            Err(ApplicationError::NotAProject {
                path: root.to_path_buf(),
            }
            .into())
        }
    }

    /// Read-mutate-write a registration document. The mutation reports
    /// whether anything changed; an unchanged document is never rewritten.
    /// Before the rewrite, the prior version is copied to a `.old` sibling.
    fn register<F>(
        &self,
        config_path: &Path,
        policy: DocPolicy,
        mutate: F,
    ) -> ForgeResult<ConfigRegistration>
    where
        F: FnOnce(&mut crate::domain::PhpValue) -> Result<bool, DomainError>,
    {
        let label = config_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config_path.display().to_string());

        let text = self.filesystem.read_file(config_path)?;
        let mut document = parse_config_document(&text, &label)?;
        if !mutate(&mut document)? {
            return Ok(ConfigRegistration::AlreadyRegistered);
        }

        let backup = backup_path(config_path);
        self.filesystem.copy_file(config_path, &backup)?;

        let backup_name = backup
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rendered = render_config_file(&document, Some(&config_header(Some(&backup_name))), policy);
        self.filesystem.write_file(config_path, &rendered)?;

        Ok(ConfigRegistration::Updated {
            config: config_path.to_path_buf(),
            backup,
        })
    }
}

fn application_config_path(root: &Path) -> PathBuf {
    root.join("config").join("application.config.php")
}

/// `application.config.php` backs up to `application.config.old`.
fn backup_path(config_path: &Path) -> PathBuf {
    config_path.with_extension("old")
}

fn view_segment(view_path: &Path) -> String {
    view_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn generated_file_doc(module_name: &str) -> DocBlock {
    DocBlock::new("This file was generated by mvcforge.")
        .tag("package", module_name)
        .tag("see", TOOL_LINK)
}

fn config_header(backup_name: Option<&str>) -> DocBlock {
    let doc = DocBlock::new("Configuration file generated by mvcforge.");
    match backup_name {
        Some(name) => doc.description(format!(
            "The previous configuration file is stored in {name}"
        )),
        None => doc,
    }
}

fn module_descriptor(module_name: &str) -> ClassModel {
    let get_config = MethodModel::public(
        "getConfig",
        "return include __DIR__ . '/config/module.config.php';",
    )
    .doc(DocBlock::new("Get module configuration").tag("return", "array"));

    let get_autoloader_config = MethodModel::public(
        "getAutoloaderConfig",
        "return array(\n\
         \x20   'Zend\\Loader\\StandardAutoloader' => array(\n\
         \x20       'namespaces' => array(\n\
         \x20           __NAMESPACE__ => __DIR__ . '/src/' . __NAMESPACE__,\n\
         \x20       ),\n\
         \x20   ),\n\
         );",
    )
    .doc(DocBlock::new("Get autoloader configuration").tag("return", "array"));

    ClassModel {
        namespace: module_name.to_string(),
        imports: Vec::new(),
        doc: ClassDoc::Generated(
            DocBlock::new(format!("Module entry point for {module_name}"))
                .description("Please add a proper description for this module"),
        ),
        name: "Module".to_string(),
        parent: None,
        methods: vec![
            MethodNode::Generated(get_config),
            MethodNode::Generated(get_autoloader_config),
        ],
    }
}

fn controller_class(namespace: &str, class: &str, name: &str) -> ClassModel {
    let index = MethodModel::public("indexAction", "return new ViewModel();").doc(
        DocBlock::new("Method indexAction").tag("return", "ViewModel"),
    );

    ClassModel {
        namespace: namespace.to_string(),
        imports: vec![
            ABSTRACT_CONTROLLER_IMPORT.to_string(),
            VIEW_MODEL_IMPORT.to_string(),
        ],
        doc: ClassDoc::Generated(
            DocBlock::new(format!("Class {class}"))
                .description(format!("Please add a proper description for the {name} controller")),
        ),
        name: class.to_string(),
        parent: Some(ABSTRACT_CONTROLLER.to_string()),
        methods: vec![MethodNode::Generated(index)],
    }
}

fn action_method(method_name: &str) -> MethodModel {
    MethodModel::public(method_name, "return new ViewModel();").doc(
        DocBlock::new(format!("Method {method_name}")).tag("return", "ViewModel"),
    )
}
