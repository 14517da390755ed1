//! Source selection among format variants

use crate::types::ResolvedSrc;
use log::trace;

/// Pick the candidate best matching an ordered list of preferred formats.
///
/// Preferences are walked in order and the first candidate whose format
/// matches (ignoring ASCII case) wins. Ties go to registration order. With no
/// match the first candidate is returned. `None` only for an empty list.
pub fn select<'a, S: AsRef<str>>(
    candidates: &'a [ResolvedSrc],
    preferred: &[S],
) -> Option<&'a ResolvedSrc> {
    select_index(candidates, preferred).map(|index| &candidates[index])
}

/// Index form of [`select`]
pub fn select_index<S: AsRef<str>>(candidates: &[ResolvedSrc], preferred: &[S]) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    for format in preferred.iter().map(AsRef::as_ref) {
        let hit = candidates.iter().position(|candidate| {
            candidate
                .format
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(format))
        });
        if let Some(index) = hit {
            trace!("Selected '{}' for preferred format '{}'", candidates[index].src, format);
            return Some(index);
        }
    }

    trace!("No preferred format matched, defaulting to '{}'", candidates[0].src);
    Some(0)
}
