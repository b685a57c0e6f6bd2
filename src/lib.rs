//! i18n-catalog-updater
//!
//! 翻訳カタログをソースコード中の翻訳対象文字列と同期するツール群
//!
//! The pieces compose as follows: [`catalog::Catalog::load`] reads a catalog,
//! [`indexer::SourceWalker`] finds the strings used in a source tree,
//! [`reconcile::Reconciler`] flags and guesses entries, and [`tools`] exposes the
//! whole run as the `updatei18n` subcommand.

pub mod catalog;
pub mod config;
pub mod indexer;
pub mod reconcile;
pub mod similarity;
pub mod tools;
pub mod types;
pub mod value;

#[cfg(test)]
mod test_utils;

// ToolRegistry を再エクスポート
pub use tools::{
    ToolError,
    ToolRegistry,
};
