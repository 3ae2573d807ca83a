//! Slug generation for output paths and hrefs.

/// Convert a note identity to its URL form.
///
/// Rules:
/// - Replace each space with a hyphen
/// - Everything else (case, punctuation, path separators) is kept as-is
///
/// # Examples
///
/// ```
/// use linkweave_core::slugify;
///
/// assert_eq!(slugify("My Note"), "My-Note");
/// assert_eq!(slugify("journal/Day One"), "journal/Day-One");
/// ```
pub fn slugify(input: &str) -> String {
    input.replace(' ', "-")
}

/// Output-relative `.html` path for a note's relative source path.
///
/// The whole path is slugged and the extension (if any) swapped for `.html`.
pub fn html_path(rel_path: &str) -> String {
    let slug = slugify(rel_path);
    format!("{}.html", strip_extension(&slug))
}

/// Strip the final extension from a `/`-separated relative path.
///
/// Dots in directory names and leading dots in the file name are not treated
/// as extension separators.
pub fn strip_extension(rel_path: &str) -> &str {
    let file_start = rel_path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match rel_path[file_start..].rfind('.') {
        Some(0) | None => rel_path,
        Some(dot) => &rel_path[..file_start + dot],
    }
}
