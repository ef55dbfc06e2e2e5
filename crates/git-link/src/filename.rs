// Copyright 2026 Oxide Computer Company

//! Display file names for materialized objects.

/// The file name used when an object expression has nothing usable after
/// its last `:` (for example, an empty expression or `master:docs/`).
pub const FALLBACK_FILE_NAME: &str = "git-link-object";

/// Derives a plausible base file name from an object expression.
///
/// Takes the text after the last `:` (or the whole expression if there is
/// none), then keeps only its final `/`-separated segment. If that leaves
/// nothing usable (empty, `.` or `..`), returns [`FALLBACK_FILE_NAME`].
/// The result is always a single, non-empty path component.
///
/// # Examples
///
/// ```
/// use git_link::{FALLBACK_FILE_NAME, derive_file_name};
///
/// assert_eq!(derive_file_name("master:dir/sub/file.txt"), "file.txt");
/// assert_eq!(derive_file_name("v1.0"), "v1.0");
/// assert_eq!(derive_file_name(""), FALLBACK_FILE_NAME);
/// ```
pub fn derive_file_name(object: &str) -> &str {
    let suffix = match object.rsplit_once(':') {
        Some((_, suffix)) => suffix,
        None => object,
    };
    let name = suffix.rsplit('/').next().unwrap_or(suffix);
    match name {
        "" | "." | ".." => FALLBACK_FILE_NAME,
        name => name,
    }
}
