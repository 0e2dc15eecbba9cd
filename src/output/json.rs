//! JSON rendering of the module outline
//!
//! The output is an array of `{"module", "Description", "Submodules"}` objects with
//! one-space indentation. Modules are normalized before rendering, so blank
//! descriptions always appear as the sentinel text.

use crate::extract::normalize_module;
use crate::model::Module;
use crate::OutlineError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// Renders modules as a pretty-printed JSON array
///
/// # Example
///
/// ```
/// use doc_outline::output::to_json;
/// use doc_outline::Module;
///
/// let json = to_json(&[Module::new("Widgets", "")]).unwrap();
/// assert!(json.contains(r#""Description": "No description available""#));
/// ```
pub fn to_json(modules: &[Module]) -> Result<String, OutlineError> {
    let normalized: Vec<Module> = modules.iter().cloned().map(normalize_module).collect();

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b" ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    normalized.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the JSON rendering of modules to a file
///
/// # Arguments
///
/// * `path` - Destination file, created or truncated
/// * `modules` - The modules to write
pub fn write_json(path: &Path, modules: &[Module]) -> Result<(), OutlineError> {
    let json = to_json(modules)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {} modules to {}", modules.len(), path.display());
    Ok(())
}

/// Reads a JSON array of modules into the canonical model
///
/// Both `Description`/`description` and `Submodules`/`submodules` spellings are
/// accepted, and non-string submodule values are coerced to text.
pub fn parse_modules(json: &str) -> Result<Vec<Module>, OutlineError> {
    Ok(serde_json::from_str(json)?)
}
