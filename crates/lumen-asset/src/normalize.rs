//! Shape normalization
//!
//! Turns any accepted asset shape into an alias list plus a flat list of
//! `ResolvedSrc` candidates. Deprecated fields are shadowed here and nowhere
//! else:
//!
//! | current | deprecated | rule                                   |
//! |---------|------------|----------------------------------------|
//! | `alias` | `name`     | current wins, deprecated is ignored    |
//! | `src`   | `srcs`     | current wins, deprecated is ignored    |

use crate::types::{AssetSrc, Extras, ResolvedSrc, SrcEntry, UnresolvedAsset};
use log::warn;
use lumen_core::{LumenError, Result};

const UNNAMED: &str = "<unnamed>";

/// Canonical form of one declared asset, ready for registration
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAsset {
    pub aliases: Vec<String>,
    pub candidates: Vec<ResolvedSrc>,
}

/// Normalize an author-facing asset into aliases and source candidates.
///
/// An asset without any alias is not an error here; callers decide whether
/// a name can be derived from context.
pub fn normalize(asset: &UnresolvedAsset) -> Result<NormalizedAsset> {
    let aliases = shadowed(&asset.alias, &asset.name, "alias", "name")
        .map(|names| dedup(names.as_slice()))
        .unwrap_or_default();
    let label = aliases.first().map(String::as_str).unwrap_or(UNNAMED);

    let entries = shadowed(&asset.src, &asset.srcs, "src", "srcs")
        .map(|src| src.as_slice())
        .unwrap_or_default();
    if entries.is_empty() {
        return Err(LumenError::EmptySource(label.to_string()));
    }

    let candidates = entries
        .iter()
        .map(|entry| candidate(entry, asset, label))
        .collect::<Result<Vec<_>>>()?;

    Ok(NormalizedAsset {
        aliases,
        candidates,
    })
}

/// Normalize a bare source shorthand, as if it were `{ src: <value> }`
pub fn normalize_src(src: &AssetSrc) -> Result<Vec<ResolvedSrc>> {
    normalize(&UnresolvedAsset::from_src(src.clone())).map(|asset| asset.candidates)
}

/// Infer an asset format from its path.
///
/// Query strings and fragments are dropped, then the text after the last `.`
/// of the final path segment is lower-cased. Segments without an extension
/// (`README`, `.env`, `archive.`) yield `None`. `data:` URIs use their MIME
/// subtype without any `+suffix` (`data:image/svg+xml,...` is `svg`).
pub fn infer_format(src: &str) -> Option<String> {
    if let Some(rest) = src.strip_prefix("data:") {
        let mime = rest.split([';', ',']).next().unwrap_or_default();
        let (_, subtype) = mime.split_once('/')?;
        let subtype = subtype.split('+').next().unwrap_or_default();
        return (!subtype.is_empty()).then(|| subtype.to_ascii_lowercase());
    }

    let path = src.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether a source still contains an unexpanded glob pattern.
///
/// `?` is not treated as a metacharacter since it introduces query strings.
pub fn is_glob(src: &str) -> bool {
    if src.starts_with("data:") {
        return false;
    }
    src.starts_with('!') || src.contains(['*', '[', ']', '{', '}'])
}

fn shadowed<'a, T>(
    current: &'a Option<T>,
    deprecated: &'a Option<T>,
    current_key: &str,
    deprecated_key: &str,
) -> Option<&'a T> {
    match (current, deprecated) {
        (Some(value), Some(_)) => {
            warn!(
                "Both '{}' and deprecated '{}' given; ignoring '{}'",
                current_key, deprecated_key, deprecated_key
            );
            Some(value)
        }
        (Some(value), None) => Some(value),
        (None, Some(value)) => {
            warn!("'{}' is deprecated, use '{}'", deprecated_key, current_key);
            Some(value)
        }
        (None, None) => None,
    }
}

fn dedup(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

fn candidate(entry: &SrcEntry, parent: &UnresolvedAsset, label: &str) -> Result<ResolvedSrc> {
    let (path, format, load_parser, data, own_extra) = match entry {
        SrcEntry::Path(path) => (path, None, None, None, None),
        SrcEntry::Object(obj) => {
            let path = shadowed(&obj.src, &obj.srcs, "src", "srcs")
                .ok_or_else(|| LumenError::EmptySource(label.to_string()))?;
            (
                path,
                obj.format.as_ref(),
                obj.load_parser.as_ref(),
                obj.data.as_ref(),
                Some(&obj.extra),
            )
        }
    };

    if is_glob(path) {
        return Err(LumenError::UnexpectedGlob(path.clone()));
    }

    let mut extra: Extras = parent.extra.clone();
    if let Some(own) = own_extra {
        extra.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Ok(ResolvedSrc {
        src: path.clone(),
        format: format
            .or(parent.format.as_ref())
            .cloned()
            .or_else(|| infer_format(path)),
        load_parser: load_parser.or(parent.load_parser.as_ref()).cloned(),
        data: data.or(parent.data.as_ref()).cloned(),
        extra,
    })
}
