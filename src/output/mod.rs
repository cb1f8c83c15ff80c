//! Output assembly: merging page outlines and serializing to JSON
//!
//! Each page's block sequence is folded into its own module subtree (tagged
//! with the source URL), and the subtrees are concatenated in crawl order.
//! Serialization is the documented external shape with 2-space indentation;
//! no transformation happens here beyond formatting.

use crate::crawler::CrawlOutcome;
use crate::outline::{infer_modules, Module};
use crate::Result;
use std::path::Path;

/// Folds every fetched page into modules, merged in crawl order
pub fn assemble_modules(outcome: &CrawlOutcome) -> Vec<Module> {
    let mut modules = Vec::new();
    for page in &outcome.pages {
        modules.extend(infer_modules(&page.blocks, &page.url));
    }
    modules
}

/// Serializes the module list as pretty-printed JSON (2-space indentation)
pub fn to_json(modules: &[Module]) -> Result<String> {
    Ok(serde_json::to_string_pretty(modules)?)
}

/// Writes the module list as JSON to the given path
pub fn write_json(modules: &[Module], path: &Path) -> Result<()> {
    let json = to_json(modules)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {} module(s) to {}", modules.len(), path.display());
    Ok(())
}
