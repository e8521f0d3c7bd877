//! Identifier helpers shared by user-created taxonomies, categories and features.

/// Build an XML-name-safe identifier from free text.
///
/// Drops everything that is not an ASCII letter or digit, strips leading
/// characters until the first letter, and lowercases that first letter.
pub fn id_from_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let trimmed = cleaned.trim_start_matches(|c: char| !c.is_ascii_alphabetic());
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Append `x` to `candidate` until `taken` reports it free.
pub fn make_unique(candidate: String, taken: impl Fn(&str) -> bool) -> String {
    let mut id = candidate;
    while taken(&id) {
        id.push('x');
    }
    id
}
