//! Alias registry holding every registered source candidate

use crate::select::select_index;
use crate::types::{ResolvedAsset, ResolvedSrc};
use log::debug;
use lumen_core::{LumenError, Result};
use std::collections::HashMap;

/// Candidates registered under one alias, with the alias group each came from
#[derive(Debug, Clone, Default)]
struct AliasEntry {
    sources: Vec<ResolvedSrc>,
    groups: Vec<usize>,
}

/// Registry of alias to candidate sources, plus bundle groupings.
///
/// Append-only: registering an alias again adds candidates after the existing
/// ones. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    /// Candidates indexed by alias
    aliases: HashMap<String, AliasEntry>,
    /// Alias groups in registration order
    groups: Vec<Vec<String>>,
    /// Primary alias of each bundle entry, indexed by bundle name
    bundles: HashMap<String, Vec<String>>,
    /// Bundle names in registration order
    bundle_order: Vec<String>,
}

impl AliasRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates under every alias in `aliases`
    pub fn register(&mut self, aliases: &[String], candidates: &[ResolvedSrc]) -> Result<()> {
        let Some(primary) = aliases.first() else {
            let src = candidates.first().map(|c| c.src.clone()).unwrap_or_default();
            return Err(LumenError::AnonymousAsset(src));
        };
        if candidates.is_empty() {
            return Err(LumenError::EmptySource(primary.clone()));
        }

        let group = self.groups.len();
        self.groups.push(aliases.to_vec());

        for alias in aliases {
            let entry = self.aliases.entry(alias.clone()).or_default();
            entry.sources.extend(candidates.iter().cloned());
            entry
                .groups
                .extend(std::iter::repeat(group).take(candidates.len()));
            debug!(
                "Registered {} candidate(s) for '{}' ({} total)",
                candidates.len(),
                alias,
                entry.sources.len()
            );
        }

        Ok(())
    }

    /// Record that a bundle contains the asset known by `alias`
    pub fn register_bundle_entry(&mut self, bundle: &str, alias: &str) {
        if !self.bundles.contains_key(bundle) {
            self.bundle_order.push(bundle.to_string());
        }
        let entries = self.bundles.entry(bundle.to_string()).or_default();
        if !entries.iter().any(|a| a == alias) {
            entries.push(alias.to_string());
        }
    }

    /// Resolve an alias to a single asset using ordered format preferences
    pub fn resolve<S: AsRef<str>>(&self, alias: &str, preferred: &[S]) -> Result<ResolvedAsset> {
        let entry = self
            .aliases
            .get(alias)
            .ok_or_else(|| LumenError::UnknownAlias(alias.to_string()))?;
        let index = select_index(&entry.sources, preferred)
            .ok_or_else(|| LumenError::EmptySource(alias.to_string()))?;

        let group = self.groups[entry.groups[index]].clone();
        Ok(ResolvedAsset::from_src(group, &entry.sources[index]))
    }

    /// Resolve every asset of a bundle, in declaration order
    pub fn resolve_bundle<S: AsRef<str>>(
        &self,
        bundle: &str,
        preferred: &[S],
    ) -> Result<Vec<ResolvedAsset>> {
        self.bundle_aliases(bundle)
            .ok_or_else(|| LumenError::UnknownBundle(bundle.to_string()))?
            .iter()
            .map(|alias| self.resolve(alias, preferred))
            .collect()
    }

    /// Check whether an alias has been registered
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// All candidates registered for an alias, in registration order
    pub fn candidates(&self, alias: &str) -> Option<&[ResolvedSrc]> {
        self.aliases.get(alias).map(|entry| entry.sources.as_slice())
    }

    /// Primary aliases of a bundle's entries
    pub fn bundle_aliases(&self, bundle: &str) -> Option<&[String]> {
        self.bundles.get(bundle).map(Vec::as_slice)
    }

    /// Check whether a bundle has been registered
    pub fn has_bundle(&self, bundle: &str) -> bool {
        self.bundles.contains_key(bundle)
    }

    /// Get all registered aliases, sorted
    pub fn aliases(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get all bundle names in registration order
    pub fn bundle_names(&self) -> Vec<&str> {
        self.bundle_order.iter().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered aliases
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
