//! Pure path ↔ namespace mapping. No I/O happens here.

use std::path::{Component, Path};

/// Derive the namespace of `path` from its directories below `root`.
///
/// A file directly inside `root` (or `root` itself) has the empty namespace;
/// otherwise every intermediate directory name is joined with `separator`.
#[must_use]
pub fn namespace_from_path(root: &Path, path: &Path, separator: &str) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return String::new();
    };
    let Some(dirs) = relative.parent() else {
        return String::new();
    };

    dirs.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Split a namespace into its segments; the empty namespace has none.
pub fn segments<'a>(namespace: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    namespace
        .split(separator)
        .filter(move |_| !namespace.is_empty())
}

/// Qualify `name` with `namespace`, or return it bare at the top level.
#[must_use]
pub fn qualify(namespace: &str, name: &str, separator: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{separator}{name}")
    }
}

///
/// TESTS
///
