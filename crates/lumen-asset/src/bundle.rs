//! Bundle expansion

use crate::normalize::{normalize, NormalizedAsset};
use crate::registry::AliasRegistry;
use crate::types::{AssetsBundle, BundleAssets, OneOrMany, RecordEntry, UnresolvedAsset};
use log::debug;
use lumen_core::{LumenError, Result};

/// Expand a bundle into normalized assets, validating every element.
///
/// Nothing is returned unless all elements normalize and carry an alias.
pub fn expand(bundle: &AssetsBundle) -> Result<Vec<NormalizedAsset>> {
    let assets: Vec<UnresolvedAsset> = match &bundle.assets {
        BundleAssets::List(items) => items.clone(),
        BundleAssets::Record(entries) => entries
            .iter()
            .map(|(key, entry)| keyed_asset(key, entry))
            .collect(),
    };

    assets
        .iter()
        .enumerate()
        .map(|(index, asset)| {
            let normalized = normalize(asset)?;
            if normalized.aliases.is_empty() {
                return Err(LumenError::MissingAlias {
                    bundle: bundle.name.clone(),
                    index,
                });
            }
            Ok(normalized)
        })
        .collect()
}

/// Register already-expanded bundle contents. Every asset from [`expand`]
/// has an alias and at least one candidate, so registration cannot stop
/// partway.
pub(crate) fn commit(
    registry: &mut AliasRegistry,
    bundle: &str,
    assets: &[NormalizedAsset],
) -> Result<()> {
    for asset in assets {
        registry.register(&asset.aliases, &asset.candidates)?;
        if let Some(primary) = asset.aliases.first() {
            registry.register_bundle_entry(bundle, primary);
        }
    }
    debug!("Loaded bundle '{}' ({} assets)", bundle, assets.len());
    Ok(())
}

/// Expand and register a single bundle, all or nothing
pub fn load_bundle(registry: &mut AliasRegistry, bundle: &AssetsBundle) -> Result<()> {
    let assets = expand(bundle)?;
    commit(registry, &bundle.name, &assets)
}

fn keyed_asset(key: &str, entry: &RecordEntry) -> UnresolvedAsset {
    match entry {
        RecordEntry::Sources(src) => UnresolvedAsset {
            alias: Some(OneOrMany::One(key.to_string())),
            ..UnresolvedAsset::from_src(src.clone())
        },
        RecordEntry::Asset(asset) if asset.declares_alias() => asset.clone(),
        RecordEntry::Asset(asset) => UnresolvedAsset {
            alias: Some(OneOrMany::One(key.to_string())),
            ..asset.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: serde_json::Value) -> AssetsBundle {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_expand_list_form() {
        let assets = expand(&bundle(json!({
            "name": "ui",
            "assets": [
                { "alias": "button", "src": ["button.webp", "button.png"] },
                { "name": "cursor", "src": "cursor.png" }
            ]
        })))
        .unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].aliases, vec!["button"]);
        assert_eq!(assets[0].candidates.len(), 2);
        assert_eq!(assets[1].aliases, vec!["cursor"]);
    }

    #[test]
    fn test_expand_list_form_missing_alias() {
        let err = expand(&bundle(json!({
            "name": "ui",
            "assets": [
                { "alias": "button", "src": "button.png" },
                { "src": "orphan.png" }
            ]
        })))
        .unwrap_err();

        assert!(matches!(
            err,
            LumenError::MissingAlias { ref bundle, index: 1 } if bundle == "ui"
        ));
    }

    #[test]
    fn test_expand_record_form_uses_key() {
        let assets = expand(&bundle(json!({
            "name": "level",
            "assets": {
                "sky": "sky.jpg",
                "atlas": ["atlas.webp", "atlas.png"],
                "music": { "src": "theme.ogg", "data": { "loop": true } },
                "named": { "alias": ["boss", "enemy"], "src": "boss.png" }
            }
        })))
        .unwrap();

        let aliases: Vec<Vec<String>> = assets.iter().map(|a| a.aliases.clone()).collect();
        assert_eq!(
            aliases,
            vec![
                vec!["sky".to_string()],
                vec!["atlas".to_string()],
                vec!["music".to_string()],
                vec!["boss".to_string(), "enemy".to_string()],
            ]
        );
        assert_eq!(assets[1].candidates.len(), 2);
        assert_eq!(assets[2].candidates[0].data, Some(json!({ "loop": true })));
    }

    #[test]
    fn test_record_and_list_forms_agree() {
        let record = expand(&bundle(json!({
            "name": "a",
            "assets": { "hero": ["hero.png", "hero.webp"] }
        })))
        .unwrap();
        let list = expand(&bundle(json!({
            "name": "b",
            "assets": [{ "alias": "hero", "src": ["hero.png", "hero.webp"] }]
        })))
        .unwrap();

        assert_eq!(record, list);
    }

    #[test]
    fn test_load_bundle_is_all_or_nothing() {
        let mut registry = AliasRegistry::new();
        let err = load_bundle(
            &mut registry,
            &bundle(json!({
                "name": "broken",
                "assets": [
                    { "alias": "ok", "src": "ok.png" },
                    { "alias": "bad", "src": "sprites/*.png" }
                ]
            })),
        )
        .unwrap_err();

        assert!(matches!(err, LumenError::UnexpectedGlob(_)));
        assert!(registry.is_empty());
        assert!(!registry.has_bundle("broken"));
    }

    #[test]
    fn test_record_key_used_for_empty_alias_list() {
        let assets = expand(&bundle(json!({
            "name": "level",
            "assets": {
                "boss": { "alias": [], "src": "boss.png" },
                "minion": { "name": [], "src": "minion.png" }
            }
        })))
        .unwrap();

        assert_eq!(assets[0].aliases, vec!["boss"]);
        assert_eq!(assets[1].aliases, vec!["minion"]);
    }

    #[test]
    fn test_load_bundle_with_empty_alias_list() {
        let mut registry = AliasRegistry::new();
        load_bundle(
            &mut registry,
            &bundle(json!({
                "name": "level",
                "assets": {
                    "sky": "sky.jpg",
                    "boss": { "alias": [], "src": "boss.png" }
                }
            })),
        )
        .unwrap();

        assert_eq!(registry.resolve::<&str>("boss", &[]).unwrap().src, "boss.png");
        assert_eq!(registry.bundle_aliases("level").unwrap(), ["sky", "boss"]);
    }

    #[test]
    fn test_list_form_empty_alias_list_registers_nothing() {
        let mut registry = AliasRegistry::new();
        let err = load_bundle(
            &mut registry,
            &bundle(json!({
                "name": "level",
                "assets": [
                    { "alias": "sky", "src": "sky.jpg" },
                    { "alias": [], "src": "boss.png" }
                ]
            })),
        )
        .unwrap_err();

        assert!(matches!(err, LumenError::MissingAlias { index: 1, .. }));
        assert!(!registry.contains("sky"));
        assert!(!registry.has_bundle("level"));
    }

    #[test]
    fn test_load_bundle_registers_grouping() {
        let mut registry = AliasRegistry::new();
        load_bundle(
            &mut registry,
            &bundle(json!({
                "name": "level",
                "assets": { "sky": "sky.jpg", "sea": ["sea.png", "sea.webp"] }
            })),
        )
        .unwrap();

        assert_eq!(registry.bundle_aliases("level").unwrap(), ["sky", "sea"]);
        let assets = registry.resolve_bundle("level", &["webp"]).unwrap();
        assert_eq!(assets[1].src, "sea.webp");
    }
}
