//! Lumen Asset - Asset reference resolution
//!
//! This crate turns loosely-shaped asset declarations (bare paths, per-format
//! variants, named bundles, manifests) into canonical, loader-ready
//! descriptors, and picks one source per asset at query time.

mod bundle;
mod config;
mod manifest;
mod normalize;
mod registry;
mod resolver;
mod select;
mod types;

pub use bundle::{expand, load_bundle};
pub use config::{ResolverConfig, BASE_PATH_ENV};
pub use manifest::load_manifest;
pub use normalize::{infer_format, is_glob, normalize, normalize_src, NormalizedAsset};
pub use registry::AliasRegistry;
pub use resolver::{join_base_path, Resolver};
pub use select::{select, select_index};
pub use types::{
    AssetSrc, AssetsBundle, AssetsManifest, BundleAssets, Extras, OneOrMany, RecordEntry,
    ResolvedAsset, ResolvedSrc, SourceObject, SrcEntry, UnresolvedAsset,
};
