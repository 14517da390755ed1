//! Asset descriptor type definitions
//!
//! These mirror the author-facing manifest format: loose shapes on the way in
//! (`UnresolvedAsset`, `AssetsBundle`, `AssetsManifest`) and canonical records
//! on the way out (`ResolvedSrc`, `ResolvedAsset`).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Passthrough keys carried alongside the typed fields
pub type Extras = BTreeMap<String, Value>;

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Either a single value or a list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Borrow the contained values as a slice
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// Flatten into a list, a scalar becoming a one-element list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// One element of an asset's source list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SrcEntry {
    /// Bare path or URL
    Path(String),
    /// Source object with its own format/parser/data
    Object(SourceObject),
}

impl From<&str> for SrcEntry {
    fn from(src: &str) -> Self {
        SrcEntry::Path(src.to_string())
    }
}

impl From<String> for SrcEntry {
    fn from(src: String) -> Self {
        SrcEntry::Path(src)
    }
}

/// Source shorthand accepted wherever an asset's `src` is expected
pub type AssetSrc = OneOrMany<SrcEntry>;

/// Author-facing source object, before precedence rules are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Deprecated synonym of `src`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "loadParser", skip_serializing_if = "Option::is_none")]
    pub load_parser: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Extras,
}

/// An asset as written by a developer, not yet normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnresolvedAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<OneOrMany<String>>,
    /// Deprecated synonym of `alias`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<AssetSrc>,
    /// Deprecated synonym of `src`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcs: Option<AssetSrc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "loadParser", skip_serializing_if = "Option::is_none")]
    pub load_parser: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Extras,
}

impl UnresolvedAsset {
    /// Asset with a single alias and a single source path
    pub fn new(alias: &str, src: &str) -> Self {
        Self {
            alias: Some(OneOrMany::One(alias.to_string())),
            src: Some(OneOrMany::One(SrcEntry::from(src))),
            ..Self::default()
        }
    }

    /// Asset declaring only sources, as found in record-form bundles
    pub fn from_src(src: AssetSrc) -> Self {
        Self {
            src: Some(src),
            ..Self::default()
        }
    }

    /// Whether the asset names itself through `alias` or the deprecated `name`.
    ///
    /// `alias` shadows `name` even when empty, so `{ alias: [], name: "b" }`
    /// declares nothing.
    pub fn declares_alias(&self) -> bool {
        match (&self.alias, &self.name) {
            (Some(alias), _) => !alias.as_slice().is_empty(),
            (None, Some(name)) => !name.as_slice().is_empty(),
            (None, None) => false,
        }
    }
}

/// A single concrete source candidate. Never contains a glob pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSrc {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        rename = "loadParser",
        skip_serializing_if = "Option::is_none"
    )]
    pub load_parser: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Extras,
}

/// Loader-ready record carrying exactly one physical source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAsset {
    pub alias: Vec<String>,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(
        default,
        rename = "loadParser",
        skip_serializing_if = "Option::is_none"
    )]
    pub load_parser: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Extras,
}

impl ResolvedAsset {
    /// Materialize an asset from the candidate chosen for `alias`
    pub fn from_src(alias: Vec<String>, source: &ResolvedSrc) -> Self {
        Self {
            alias,
            src: source.src.clone(),
            format: source.format.clone(),
            load_parser: source.load_parser.clone(),
            data: source.data.clone(),
            extra: source.extra.clone(),
        }
    }
}

/// Value side of a record-form bundle entry
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEntry {
    /// Shorthand source: a path, a list of paths, or source objects
    Sources(AssetSrc),
    /// Full asset object; the record key is used when it declares no alias
    Asset(UnresolvedAsset),
}

impl RecordEntry {
    fn from_value(value: Value) -> serde_json::Result<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).map(RecordEntry::Asset),
            other => serde_json::from_value(other).map(RecordEntry::Sources),
        }
    }
}

impl<'de> Deserialize<'de> for RecordEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RecordEntry::from_value(value).map_err(D::Error::custom)
    }
}

/// Assets of a bundle, in list form or record form
#[derive(Debug, Clone, PartialEq)]
pub enum BundleAssets {
    List(Vec<UnresolvedAsset>),
    /// Alias-keyed entries in author order
    Record(Vec<(String, RecordEntry)>),
}

impl<'de> Deserialize<'de> for BundleAssets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<serde_json::Result<Vec<_>>>()
                .map(BundleAssets::List)
                .map_err(D::Error::custom),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| RecordEntry::from_value(value).map(|entry| (key, entry)))
                .collect::<serde_json::Result<Vec<_>>>()
                .map(BundleAssets::Record)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "bundle assets must be a list or a record, got {}",
                other
            ))),
        }
    }
}

/// A named group of assets found in a manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetsBundle {
    pub name: String,
    pub assets: BundleAssets,
}

/// Ordered collection of bundles, usually authored as JSON
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetsManifest {
    #[serde(default)]
    pub bundles: Vec<AssetsBundle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unresolved_asset_serde() {
        let asset: UnresolvedAsset = serde_json::from_value(json!({
            "alias": ["hero", "player"],
            "src": ["hero.webp", { "src": "hero.png", "loadParser": "loadTextures" }],
            "data": { "scaleMode": "nearest" },
            "resolution": 2
        }))
        .unwrap();

        assert_eq!(asset.alias.unwrap().into_vec(), vec!["hero", "player"]);
        let src = asset.src.unwrap();
        assert_eq!(src.as_slice().len(), 2);
        assert_eq!(src.as_slice()[0], SrcEntry::Path("hero.webp".to_string()));
        match &src.as_slice()[1] {
            SrcEntry::Object(obj) => {
                assert_eq!(obj.src.as_deref(), Some("hero.png"));
                assert_eq!(obj.load_parser.as_deref(), Some("loadTextures"));
            }
            other => panic!("expected source object, got {:?}", other),
        }
        assert_eq!(asset.data, Some(json!({ "scaleMode": "nearest" })));
        assert_eq!(asset.extra.get("resolution"), Some(&json!(2)));
    }

    #[test]
    fn test_deprecated_fields_deserialize() {
        let asset: UnresolvedAsset =
            serde_json::from_value(json!({ "name": "logo", "srcs": "logo.svg" })).unwrap();
        assert_eq!(asset.name, Some(OneOrMany::One("logo".to_string())));
        assert_eq!(asset.srcs, Some(OneOrMany::One(SrcEntry::from("logo.svg"))));
        assert!(asset.alias.is_none());
        assert!(asset.extra.is_empty());
        assert!(asset.declares_alias());
    }

    #[test]
    fn test_empty_alias_list_declares_nothing() {
        let empty_alias: UnresolvedAsset =
            serde_json::from_value(json!({ "alias": [], "src": "a.png" })).unwrap();
        let empty_name: UnresolvedAsset =
            serde_json::from_value(json!({ "name": [], "src": "a.png" })).unwrap();
        let shadowed_name: UnresolvedAsset =
            serde_json::from_value(json!({ "alias": [], "name": "b", "src": "a.png" })).unwrap();

        assert!(!empty_alias.declares_alias());
        assert!(!empty_name.declares_alias());
        assert!(!shadowed_name.declares_alias());
    }

    #[test]
    fn test_null_data_is_kept() {
        let asset: UnresolvedAsset =
            serde_json::from_value(json!({ "alias": "a", "src": "a.png", "data": null })).unwrap();
        assert_eq!(asset.data, Some(Value::Null));

        let absent: UnresolvedAsset =
            serde_json::from_value(json!({ "alias": "a", "src": "a.png" })).unwrap();
        assert_eq!(absent.data, None);

        let resolved: ResolvedAsset = serde_json::from_value(json!({
            "alias": ["a"],
            "src": "a.png",
            "data": null
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&resolved).unwrap()["data"], Value::Null);
        assert!(serde_json::to_value(&resolved)
            .unwrap()
            .as_object()
            .unwrap()
            .contains_key("data"));
    }

    #[test]
    fn test_bundle_list_form() {
        let bundle: AssetsBundle = serde_json::from_value(json!({
            "name": "ui",
            "assets": [
                { "alias": "button", "src": "button.png" },
                { "alias": "font", "src": "font.woff2" }
            ]
        }))
        .unwrap();

        match bundle.assets {
            BundleAssets::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list form, got {:?}", other),
        }
    }

    #[test]
    fn test_bundle_record_form_keeps_order() {
        let bundle: AssetsBundle = serde_json::from_value(json!({
            "name": "level",
            "assets": {
                "sky": "sky.jpg",
                "atlas": ["atlas.webp", "atlas.png"],
                "music": { "src": "theme.ogg", "data": { "loop": true } }
            }
        }))
        .unwrap();

        let BundleAssets::Record(entries) = bundle.assets else {
            panic!("expected record form");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["sky", "atlas", "music"]);
        assert!(matches!(entries[0].1, RecordEntry::Sources(OneOrMany::One(_))));
        assert!(matches!(entries[1].1, RecordEntry::Sources(OneOrMany::Many(_))));
        assert!(matches!(entries[2].1, RecordEntry::Asset(_)));
    }

    #[test]
    fn test_bundle_assets_rejects_scalar() {
        let result: serde_json::Result<AssetsBundle> =
            serde_json::from_value(json!({ "name": "broken", "assets": 42 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolved_asset_serializes_camel_case_parser() {
        let asset = ResolvedAsset {
            alias: vec!["intro".to_string()],
            src: "intro.mp4".to_string(),
            format: Some("mp4".to_string()),
            load_parser: Some("loadVideo".to_string()),
            data: None,
            extra: Extras::new(),
        };

        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(
            value,
            json!({
                "alias": ["intro"],
                "src": "intro.mp4",
                "format": "mp4",
                "loadParser": "loadVideo"
            })
        );
    }
}
