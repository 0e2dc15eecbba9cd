//! Cross-page deduplication and normalization

use crate::model::Module;
use std::collections::HashSet;

/// Placeholder written for blank module and submodule descriptions
pub const NO_DESCRIPTION: &str = "No description available";

/// Keeps the first module seen for each name, in order
///
/// Later duplicates are dropped whole; their submodules are not merged into the
/// kept copy. Names are compared exactly (case-sensitive).
pub fn dedup_modules(modules: Vec<Module>) -> Vec<Module> {
    let mut seen: HashSet<String> = HashSet::new();
    let total = modules.len();

    let unique: Vec<Module> = modules
        .into_iter()
        .filter(|module| seen.insert(module.name.clone()))
        .collect();

    if unique.len() < total {
        tracing::debug!("Dropped {} duplicate modules", total - unique.len());
    }

    unique
}

/// Fills blank descriptions and drops unnamed submodules
pub fn normalize_module(mut module: Module) -> Module {
    if module.description.trim().is_empty() {
        module.description = NO_DESCRIPTION.to_string();
    }

    module.submodules = module
        .submodules
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, description)| {
            if description.trim().is_empty() {
                (name, NO_DESCRIPTION.to_string())
            } else {
                (name, description)
            }
        })
        .collect();

    module
}

/// Deduplicates by name, then normalizes every surviving module
pub fn finalize_modules(modules: Vec<Module>) -> Vec<Module> {
    dedup_modules(modules)
        .into_iter()
        .map(normalize_module)
        .collect()
}
