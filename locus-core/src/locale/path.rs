//! Path classification.
//!
//! A path carries a locale prefix only when its first segment equals a
//! registered tag exactly: `/fr` and `/fr/home` do, `/frank` and `/FR` do not.

use super::registry::{LocaleRegistry, LocaleTag};

/// Returns the first segment of an absolute path, or `None` for relative input.
pub fn first_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/')?;
    Some(rest.split('/').next().unwrap_or(rest))
}

/// Removes `prefix` from `path` when it ends on a segment boundary.
///
/// Returns the remainder, which is either empty or starts with `/`.
pub fn strip_path_prefix<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

pub fn classify<'r>(path: &str, registry: &'r LocaleRegistry) -> Option<&'r LocaleTag> {
    first_segment(path).and_then(|segment| registry.get(segment))
}

/// Splits a prefixed path into its locale and the remaining path.
///
/// The remainder is `/` when nothing follows the locale segment.
pub fn split_locale<'p, 'r>(
    path: &'p str,
    registry: &'r LocaleRegistry,
) -> Option<(&'r LocaleTag, &'p str)> {
    let tag = classify(path, registry)?;
    let rest = &path[1 + tag.as_str().len()..];
    Some((tag, if rest.is_empty() { "/" } else { rest }))
}
