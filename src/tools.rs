//! Command surface: a registry of named tools, each a `clap` subcommand.
//!
//! ```no_run
//! use i18n_catalog_updater::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::with_default_tools();
//! let mut out = Vec::new();
//! registry.execute(["i18n-catalog-updater", "updatei18n", "fr.cat", "src"], &mut out)?;
//! # Ok::<(), i18n_catalog_updater::tools::ToolError>(())
//! ```

/// `updatei18n` tool
pub mod update_i18n;

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use clap::error::{
    ContextKind,
    ContextValue,
    ErrorKind,
};
use clap::{
    Arg,
    ArgMatches,
    Command,
    value_parser,
};
use indexmap::IndexMap;
use thiserror::Error;

pub use update_i18n::UpdateI18n;

use crate::catalog::CatalogError;
use crate::config::{
    ConfigError,
    ConfigManager,
    I18nSettings,
};
use crate::indexer::IndexerError;

/// Program name shown in usage messages.
pub const PROGRAM_NAME: &str = "i18n-catalog-updater";

#[derive(Error, Debug)]
pub enum ToolError {
    /// Bad command line; the `clap` error carries the rendered usage
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The rendering carries the usage line and every registered tool name
    #[error("Unknown tool '{name}'\n\n{usage}\n\nTools:\n{}", format_tool_names(.available))]
    UnknownTool { name: String, usage: String, available: Vec<&'static str> },

    #[error("Missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn format_tool_names(names: &[&str]) -> String {
    names.iter().map(|name| format!("  {name}")).collect::<Vec<_>>().join("\n")
}

/// What a running tool may use besides its own arguments.
pub struct ToolContext<'a> {
    pub settings: &'a I18nSettings,
    /// Destination of the tool's result; diagnostics go to the log instead.
    pub out: &'a mut dyn Write,
}

impl fmt::Debug for ToolContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolContext").field("settings", self.settings).finish_non_exhaustive()
    }
}

/// A subcommand of the program.
pub trait Tool: fmt::Debug {
    /// Subcommand name; must equal the name of [`Tool::command`].
    fn name(&self) -> &'static str;

    /// Argument definitions of the subcommand.
    fn command(&self) -> Command;

    /// Runs the tool with its parsed arguments.
    ///
    /// # Errors
    /// Any failure of the tool; nothing has been written to `context.out` then.
    fn run(&self, matches: &ArgMatches, context: &mut ToolContext<'_>) -> Result<(), ToolError>;
}

/// Registered tools, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<&'static str, Box<dyn Tool>>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool.
    #[must_use]
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();
        registry.register(UpdateI18n);
        registry
    }

    /// Adds a tool, replacing any tool registered under the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    /// Top-level command with one subcommand per tool and the global `--config` option.
    #[must_use]
    pub fn command(&self) -> Command {
        Command::new(PROGRAM_NAME)
            .about("Keeps translation catalogs in sync with the strings used in source files")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("config")
                    .long("config")
                    .global(true)
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("Settings file to use instead of ./.i18n-catalog.json"),
            )
            .subcommands(self.tools.values().map(|tool| tool.command()))
    }

    /// Parses `args` (program name first), loads the settings and runs the chosen tool.
    ///
    /// # Errors
    /// - Invalid command line, including help and version requests
    /// - Invalid settings file
    /// - Failure of the tool itself
    pub fn execute<I, T>(&self, args: I, out: &mut dyn Write) -> Result<(), ToolError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args).map_err(|err| {
            if err.kind() == ErrorKind::InvalidSubcommand {
                let name = match err.get(ContextKind::InvalidSubcommand) {
                    Some(ContextValue::String(name)) => name.clone(),
                    _ => String::new(),
                };
                self.unknown_tool(name)
            } else {
                ToolError::Usage(err)
            }
        })?;
        let config_manager = load_config(&matches)?;

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(self.unknown_tool(String::new()));
        };
        let tool = self.tools.get(name).ok_or_else(|| self.unknown_tool(name.to_string()))?;

        tracing::debug!(tool = name, "Running tool");
        let mut context = ToolContext { settings: config_manager.get_settings(), out };
        tool.run(sub_matches, &mut context)
    }

    fn unknown_tool(&self, name: String) -> ToolError {
        ToolError::UnknownTool {
            name,
            usage: self.command().render_usage().to_string(),
            available: self.names().collect(),
        }
    }
}

/// Reads `--config` if given, otherwise `.i18n-catalog.json` in the working directory.
fn load_config(matches: &ArgMatches) -> Result<ConfigManager, ConfigError> {
    let mut config_manager = ConfigManager::new();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        config_manager.load_settings_from_file(path)?;
    } else {
        let workspace_root = std::env::current_dir().ok();
        config_manager.load_settings(workspace_root.as_deref())?;
    }

    if let Some(source) = config_manager.source() {
        tracing::info!("Using settings from '{}'", source.display());
    }
    Ok(config_manager)
}
