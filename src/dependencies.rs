use crate::errors::EjectError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, trace};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    dependencies: Option<Map<String, Value>>,
    #[serde(default)]
    dev_dependencies: Option<Map<String, Value>>,
}

/// Reads the manifest and returns `dependencies` keys followed by
/// `devDependencies` keys, each in declaration order. Duplicates are kept.
pub fn list_dependencies(manifest_path: &Path) -> Result<Vec<String>, EjectError> {
    if !manifest_path.is_file() {
        return Err(EjectError::ManifestNotFound(manifest_path.to_path_buf()));
    }

    debug!("Reading manifest: {}", manifest_path.display());
    let raw = std::fs::read_to_string(manifest_path)
        .map_err(|e| EjectError::io(manifest_path, e))?;
    parse_dependencies(&raw)
}

pub fn parse_dependencies(raw: &str) -> Result<Vec<String>, EjectError> {
    let manifest: Manifest =
        serde_json::from_str(raw).map_err(|e| EjectError::ManifestParse(e.to_string()))?;

    let dependencies: Vec<String> = manifest
        .dependencies
        .into_iter()
        .chain(manifest.dev_dependencies)
        .flat_map(|map| map.into_iter().map(|(name, _)| name))
        .collect();

    if dependencies.is_empty() {
        return Err(EjectError::NoDependencies);
    }

    trace!("Found {} dependencies", dependencies.len());
    Ok(dependencies)
}

/// Keeps only names containing `filter` as a case-sensitive substring.
/// An empty or absent filter returns the input unchanged.
pub fn filter_dependencies(
    dependencies: Vec<String>,
    filter: Option<&str>,
) -> Result<Vec<String>, EjectError> {
    let filter = match filter {
        Some(f) if !f.is_empty() => f,
        _ => return Ok(dependencies),
    };

    let matched: Vec<String> = dependencies
        .into_iter()
        .filter(|dep| dep.contains(filter))
        .collect();

    if matched.is_empty() {
        return Err(EjectError::DependencyNotFound {
            filter: filter.to_owned(),
        });
    }

    debug!("Filter {:?} matched {} dependencies", filter, matched.len());
    Ok(matched)
}

/// Directory name used under the destination root: the part after the
/// scope separator for scoped packages.
pub fn eject_directory_name(dependency: &str) -> &str {
    match dependency.split_once('/') {
        Some((_, name)) => name,
        None => dependency,
    }
}
