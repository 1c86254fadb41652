//! URL-safe slugs derived from post titles.

/// Derive a slug from `title`.
///
/// Letters and digits of any script are kept and lowercased. Every run
/// of other characters (whitespace, punctuation, symbols) becomes a
/// single `-`. Leading and trailing separators are dropped, so a title
/// with no letters or digits yields an empty slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
