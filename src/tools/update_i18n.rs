//! `updatei18n`: merges the strings used in source files into a catalog.
//!
//! The catalog is read without regard to flags left by earlier runs. The merged
//! catalog, written to the tool output, keeps every original entry (flagged
//! `UNUSED` when no source uses it) and appends one entry per new string,
//! flagged `GUESSED` or `MISSING`.

use std::path::{
    Path,
    PathBuf,
};

use clap::{
    Arg,
    ArgMatches,
    Command,
    value_parser,
};

use super::{
    Tool,
    ToolContext,
    ToolError,
};
use crate::catalog::Catalog;
use crate::config::I18nSettings;
use crate::indexer::SourceWalker;
use crate::reconcile::{
    Reconciled,
    Reconciler,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateI18n;

impl Tool for UpdateI18n {
    fn name(&self) -> &'static str {
        "updatei18n"
    }

    fn command(&self) -> Command {
        Command::new(self.name())
            .about("Merge the strings found in source files into a translation catalog")
            .arg(
                Arg::new("catalog")
                    .required(true)
                    .value_name("I18N_FILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("Original translation file to read (flags are ignored)"),
            )
            .arg(
                Arg::new("inputs")
                    .required(true)
                    .num_args(1..)
                    .value_name("INPUT")
                    .value_parser(value_parser!(PathBuf))
                    .help("Source files or directories to scan"),
            )
    }

    fn run(&self, matches: &ArgMatches, context: &mut ToolContext<'_>) -> Result<(), ToolError> {
        let catalog_path =
            matches.get_one::<PathBuf>("catalog").ok_or(ToolError::MissingArgument("catalog"))?;
        let inputs: Vec<PathBuf> =
            matches.get_many::<PathBuf>("inputs").into_iter().flatten().cloned().collect();
        if inputs.is_empty() {
            return Err(ToolError::MissingArgument("inputs"));
        }

        let merged = update_catalog(catalog_path, &inputs, context.settings)?;
        writeln!(context.out, "{}", merged.to_value().to_text())?;
        context.out.flush()?;
        Ok(())
    }
}

/// Loads the catalog at `catalog_path`, scans `inputs` and returns the merged catalog.
///
/// # Errors
/// - The catalog cannot be read
/// - An input does not exist or cannot be read
pub fn update_catalog(
    catalog_path: &Path,
    inputs: &[PathBuf],
    settings: &I18nSettings,
) -> Result<Catalog, ToolError> {
    let catalog = Catalog::load(catalog_path)?;
    tracing::debug!(entries = catalog.entries.len(), "Loaded catalog '{}'", catalog.name);

    let mut reconciler = Reconciler::new(&catalog, settings.fuzzy_threshold);
    let stats =
        SourceWalker::new(settings).scan(inputs, |candidate| reconciler.observe(candidate))?;

    let Reconciled { catalog: merged, summary } = reconciler.finish();
    tracing::info!(
        files = stats.files_scanned,
        binary_skipped = stats.binary_skipped,
        used = summary.used,
        unused = summary.unused,
        guessed = summary.guessed,
        missing = summary.missing,
        "Reconciled catalog '{}'",
        catalog.name
    );

    Ok(merged)
}
