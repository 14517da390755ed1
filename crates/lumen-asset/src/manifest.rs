//! Manifest loading

use crate::bundle::{commit, expand};
use crate::registry::AliasRegistry;
use crate::types::AssetsManifest;
use log::debug;
use lumen_core::{LumenError, Result};
use std::collections::HashSet;

impl AssetsManifest {
    /// Parse a manifest from an in-memory JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Expand every bundle of a manifest into the registry.
///
/// Bundle names must be unique within the manifest. Every bundle is expanded
/// and validated before the first one is committed, so a failing manifest
/// leaves the registry untouched.
pub fn load_manifest(registry: &mut AliasRegistry, manifest: &AssetsManifest) -> Result<()> {
    let mut seen = HashSet::new();
    for bundle in &manifest.bundles {
        if !seen.insert(bundle.name.as_str()) {
            return Err(LumenError::DuplicateBundleName(bundle.name.clone()));
        }
    }

    let expanded = manifest
        .bundles
        .iter()
        .map(|bundle| expand(bundle).map(|assets| (bundle.name.as_str(), assets)))
        .collect::<Result<Vec<_>>>()?;

    for (name, assets) in &expanded {
        commit(registry, name, assets)?;
    }

    debug!("Loaded manifest with {} bundle(s)", expanded.len());
    Ok(())
}
