//! Note search-term matching.
//!
//! A search term is a plain case-insensitive substring, never a pattern.
//! The PostgreSQL store expresses the same rule with `POSITION(LOWER(..))`.

/// Normalize a raw `searchTerm` query value. Blank terms mean "no filter".
pub fn normalize_search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Whether `term` occurs in `title` or `content`, ignoring case.
pub fn matches_search_term(term: &str, title: &str, content: Option<&str>) -> bool {
    let needle = term.to_lowercase();
    title.to_lowercase().contains(&needle)
        || content.is_some_and(|c| c.to_lowercase().contains(&needle))
}
