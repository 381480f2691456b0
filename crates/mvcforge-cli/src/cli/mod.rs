//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ---- Top-level CLI ----------------------------------------------------------

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mvcforge",
    bin_name = "mvcforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Code generator for layered MVC web applications",
    long_about = "mvcforge scaffolds ZF2-style PHP applications: it bootstraps \
                  a fresh project from the skeleton repository and generates \
                  modules, controllers, and actions inside an existing tree.",
    after_help = "EXAMPLES:\n\
        \x20 mvcforge create project ./shop\n\
        \x20 mvcforge create module Blog\n\
        \x20 mvcforge create controller Index Blog\n\
        \x20 mvcforge create action show Index Blog\n\
        \x20 mvcforge completions bash > /usr/share/bash-completion/completions/mvcforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ---- Subcommands ------------------------------------------------------------

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project, module, controller, or action.
    #[command(
        visible_alias = "c",
        about = "Create application artifacts",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 mvcforge create project ./shop\n\
            \x20 mvcforge create module Blog\n\
            \x20 mvcforge create controller Admin-index Blog --single-route\n\
            \x20 mvcforge create action show-all Index Blog"
    )]
    Create(CreateCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mvcforge completions bash > ~/.local/share/bash-completion/completions/mvcforge\n\
            \x20 mvcforge completions zsh  > ~/.zfunc/_mvcforge\n\
            \x20 mvcforge completions fish > ~/.config/fish/completions/mvcforge.fish"
    )]
    Completions(CompletionsArgs),
}

/// Subcommands for `mvcforge create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Bootstrap a new application from the skeleton repository.
    #[command(about = "Create a new application from the remote skeleton")]
    Project(ProjectArgs),

    /// Create a module inside an existing application.
    #[command(about = "Create a module in an existing application")]
    Module(ModuleArgs),

    /// Create a controller inside an existing module.
    #[command(about = "Create a controller in an existing module")]
    Controller(ControllerArgs),

    /// Add an action method to an existing controller.
    #[command(about = "Add an action to an existing controller")]
    Action(ActionArgs),
}

// ---- create project ---------------------------------------------------------

/// Arguments for `mvcforge create project`.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Directory to create.  Must not already exist.
    #[arg(value_name = "PATH", help = "Directory to create the application in")]
    pub path: PathBuf,
}

// ---- create module ----------------------------------------------------------

/// Arguments for `mvcforge create module`.
#[derive(Debug, Args)]
pub struct ModuleArgs {
    /// Module name, e.g. `Blog` or `my-shop`.
    #[arg(value_name = "NAME", help = "Name of the module to create")]
    pub name: String,

    /// Application root.  Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".", help = "Application root directory")]
    pub path: PathBuf,

    /// Keep the name verbatim instead of camel-casing it.
    #[arg(long = "ignore-conventions", help = "Do not apply naming conventions")]
    pub ignore_conventions: bool,

    /// Generate sources without docblock comments.
    #[arg(long = "no-docblocks", help = "Omit docblocks from generated files")]
    pub no_docblocks: bool,
}

// ---- create controller ------------------------------------------------------

/// Arguments for `mvcforge create controller`.
#[derive(Debug, Args)]
pub struct ControllerArgs {
    /// Controller name, without the `Controller` suffix.
    #[arg(value_name = "NAME", help = "Name of the controller to create")]
    pub name: String,

    /// Module the controller belongs to.
    #[arg(value_name = "MODULE", help = "Module to create the controller in")]
    pub module: String,

    /// Application root.  Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".", help = "Application root directory")]
    pub path: PathBuf,

    /// Keep the names verbatim instead of camel-casing them.
    #[arg(long = "ignore-conventions", help = "Do not apply naming conventions")]
    pub ignore_conventions: bool,

    /// Skip the invokable registration in the module config.
    #[arg(long = "no-config", help = "Do not register the controller in module.config.php")]
    pub no_config: bool,

    /// Generate sources without docblock comments.
    #[arg(long = "no-docblocks", help = "Omit docblocks from generated files")]
    pub no_docblocks: bool,

    /// Also register a literal route for the controller.
    #[arg(long = "single-route", help = "Register a literal route for the controller")]
    pub single_route: bool,
}

// ---- create action ----------------------------------------------------------

/// Arguments for `mvcforge create action`.
#[derive(Debug, Args)]
pub struct ActionArgs {
    /// Action name, without the `Action` suffix.
    #[arg(value_name = "NAME", help = "Name of the action to create")]
    pub name: String,

    /// Controller the action belongs to, without the `Controller` suffix.
    #[arg(value_name = "CONTROLLER", help = "Controller to add the action to")]
    pub controller: String,

    /// Module the controller belongs to.
    #[arg(value_name = "MODULE", help = "Module the controller lives in")]
    pub module: String,

    /// Application root.  Defaults to the current directory.
    #[arg(value_name = "PATH", default_value = ".", help = "Application root directory")]
    pub path: PathBuf,

    /// Keep the names verbatim instead of camel-casing them.
    #[arg(long = "ignore-conventions", help = "Do not apply naming conventions")]
    pub ignore_conventions: bool,

    /// Generate sources without docblock comments.
    #[arg(long = "no-docblocks", help = "Omit docblocks from generated files")]
    pub no_docblocks: bool,
}

// ---- completions ------------------------------------------------------------

/// Arguments for `mvcforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ---- tests ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_create_module() {
        let cli = Cli::try_parse_from(["mvcforge", "create", "module", "Blog"]).unwrap();
        match cli.command {
            Commands::Create(CreateCommands::Module(args)) => {
                assert_eq!(args.name, "Blog");
                assert_eq!(args.path, PathBuf::from("."));
                assert!(!args.no_docblocks);
            }
            _ => panic!("expected create module"),
        }
    }

    #[test]
    fn cli_parses_create_controller_with_flags() {
        let cli = Cli::try_parse_from([
            "mvcforge",
            "create",
            "controller",
            "Admin-index",
            "Blog",
            "/tmp/app",
            "--single-route",
            "--no-docblocks",
        ])
        .unwrap();
        match cli.command {
            Commands::Create(CreateCommands::Controller(args)) => {
                assert_eq!(args.name, "Admin-index");
                assert_eq!(args.module, "Blog");
                assert_eq!(args.path, PathBuf::from("/tmp/app"));
                assert!(args.single_route);
                assert!(args.no_docblocks);
                assert!(!args.no_config);
            }
            _ => panic!("expected create controller"),
        }
    }

    #[test]
    fn cli_parses_create_action_positional_order() {
        let cli =
            Cli::try_parse_from(["mvcforge", "create", "action", "show", "Index", "Blog"]).unwrap();
        match cli.command {
            Commands::Create(CreateCommands::Action(args)) => {
                assert_eq!(args.name, "show");
                assert_eq!(args.controller, "Index");
                assert_eq!(args.module, "Blog");
            }
            _ => panic!("expected create action"),
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["mvcforge"]).is_err());
        assert!(Cli::try_parse_from(["mvcforge", "create"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result =
            Cli::try_parse_from(["mvcforge", "--quiet", "--verbose", "create", "module", "X"]);
        assert!(result.is_err());
    }
}
