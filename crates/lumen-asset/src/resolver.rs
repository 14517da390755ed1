//! Engine-facing resolver
//!
//! Owns one [`AliasRegistry`] and a [`ResolverConfig`]. Registration needs
//! `&mut self` and resolution only `&self`, so a resolver that has finished
//! loading can be shared freely between readers.

use crate::bundle::load_bundle;
use crate::config::ResolverConfig;
use crate::manifest::load_manifest;
use crate::normalize::normalize;
use crate::registry::AliasRegistry;
use crate::types::{AssetsBundle, AssetsManifest, ResolvedAsset, ResolvedSrc, UnresolvedAsset};
use lumen_core::{LumenError, Result};
use std::collections::BTreeMap;

/// Resolver combining an alias registry with default query settings
#[derive(Debug, Default)]
pub struct Resolver {
    registry: AliasRegistry,
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver from loaded configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            registry: AliasRegistry::new(),
            config,
        }
    }

    /// Current settings
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Read-only view of the underlying registry
    pub fn registry(&self) -> &AliasRegistry {
        &self.registry
    }

    /// Replace the default format preferences
    pub fn prefer<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.preferred_formats = formats.into_iter().map(Into::into).collect();
    }

    /// Register a single source under an alias
    pub fn add(&mut self, alias: &str, src: &str) -> Result<()> {
        self.add_asset(&UnresolvedAsset::new(alias, src))
    }

    /// Register an ad-hoc asset outside of any bundle
    pub fn add_asset(&mut self, asset: &UnresolvedAsset) -> Result<()> {
        let normalized = normalize(asset)?;
        self.registry
            .register(&normalized.aliases, &normalized.candidates)
    }

    /// Register a single bundle
    pub fn add_bundle(&mut self, bundle: &AssetsBundle) -> Result<()> {
        load_bundle(&mut self.registry, bundle)
    }

    /// Register every bundle of a manifest
    pub fn add_manifest(&mut self, manifest: &AssetsManifest) -> Result<()> {
        load_manifest(&mut self.registry, manifest)
    }

    /// Resolve an alias using the configured format preferences
    pub fn resolve(&self, alias: &str) -> Result<ResolvedAsset> {
        self.resolve_with(alias, &self.config.preferred_formats)
    }

    /// Resolve an alias with explicit format preferences
    pub fn resolve_with<S: AsRef<str>>(&self, alias: &str, preferred: &[S]) -> Result<ResolvedAsset> {
        self.registry
            .resolve(alias, preferred)
            .map(|asset| self.with_base_path(asset))
    }

    /// Resolve every asset of a bundle using the configured preferences
    pub fn resolve_bundle(&self, bundle: &str) -> Result<Vec<ResolvedAsset>> {
        self.resolve_bundle_with(bundle, &self.config.preferred_formats)
    }

    /// Resolve every asset of a bundle with explicit preferences
    pub fn resolve_bundle_with<S: AsRef<str>>(
        &self,
        bundle: &str,
        preferred: &[S],
    ) -> Result<Vec<ResolvedAsset>> {
        let assets = self.registry.resolve_bundle(bundle, preferred)?;
        Ok(assets
            .into_iter()
            .map(|asset| self.with_base_path(asset))
            .collect())
    }

    /// Resolve several aliases at once, keyed by the requested alias
    pub fn resolve_many<S: AsRef<str>>(
        &self,
        aliases: &[S],
    ) -> Result<BTreeMap<String, ResolvedAsset>> {
        aliases
            .iter()
            .map(|alias| {
                let alias = alias.as_ref();
                self.resolve(alias).map(|asset| (alias.to_string(), asset))
            })
            .collect()
    }

    /// Check whether an alias has been registered
    pub fn has_alias(&self, alias: &str) -> bool {
        self.registry.contains(alias)
    }

    /// All candidates registered for an alias
    pub fn candidates(&self, alias: &str) -> Result<&[ResolvedSrc]> {
        self.registry
            .candidates(alias)
            .ok_or_else(|| LumenError::UnknownAlias(alias.to_string()))
    }

    /// Get all registered aliases, sorted
    pub fn aliases(&self) -> Vec<&str> {
        self.registry.aliases()
    }

    /// Get all bundle names in registration order
    pub fn bundle_names(&self) -> Vec<&str> {
        self.registry.bundle_names()
    }

    fn with_base_path(&self, mut asset: ResolvedAsset) -> ResolvedAsset {
        if let Some(base) = &self.config.base_path {
            asset.src = join_base_path(base, &asset.src);
        }
        asset
    }
}

/// Join a relative source onto a base path.
///
/// Absolute paths, URLs with a scheme, and `data:`/`blob:` URIs are returned
/// unchanged.
pub fn join_base_path(base: &str, src: &str) -> String {
    if base.is_empty() || src.starts_with('/') || is_uri(src) {
        return src.to_string();
    }
    let src = src.strip_prefix("./").unwrap_or(src);
    format!("{}/{}", base.trim_end_matches('/'), src)
}

fn is_uri(src: &str) -> bool {
    src.starts_with("data:") || src.starts_with("blob:") || src.contains("://")
}
