//! Path shape checks shared by rewrite rules and navigation links.
//!
//! Two kinds of paths flow through the site configuration:
//! - **links**: absolute URL paths written in nav and sidebar entries
//!   (e.g. `/configuration/config-file`)
//! - **source paths**: repository-relative markdown paths fed to the
//!   rewrite rules (e.g. `configuration/config-file.md`)

/// Markdown source file extension.
pub(crate) const MARKDOWN_EXT: &str = ".md";

/// Index document name.
pub(crate) const INDEX_DOCUMENT: &str = "index.md";

/// Check that every segment is a real name (no empty, `.` or `..` segments).
fn segments_are_clean(path: &str) -> bool {
    path.split('/')
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Check whether a navigation link is normalized.
///
/// A normalized link starts with `/`, has no empty, `.` or `..` segments
/// and does not point at a `.md` file. A single trailing `/` is allowed
/// and `/` alone is the site root.
#[must_use]
pub fn is_normalized_link(link: &str) -> bool {
    let Some(rest) = link.strip_prefix('/') else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    !rest.ends_with(MARKDOWN_EXT) && segments_are_clean(rest)
}

/// Check whether a rewritten source path is normalized.
///
/// A normalized source path is relative, has no empty, `.` or `..`
/// segments and names a markdown file.
#[must_use]
pub fn is_normalized_source(path: &str) -> bool {
    !path.starts_with('/')
        && path.len() > MARKDOWN_EXT.len()
        && path.ends_with(MARKDOWN_EXT)
        && segments_are_clean(path)
}

/// Map a navigation link to the source document it refers to.
///
/// `/` maps to `index.md`, a trailing `/` maps to that directory's
/// `index.md`, anything else gains the `.md` extension.
#[must_use]
pub fn link_to_source(link: &str) -> String {
    let trimmed = link.trim_start_matches('/');
    if trimmed.is_empty() {
        INDEX_DOCUMENT.to_owned()
    } else if trimmed.ends_with('/') {
        format!("{trimmed}{INDEX_DOCUMENT}")
    } else {
        format!("{trimmed}{MARKDOWN_EXT}")
    }
}
