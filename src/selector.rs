//! Selector-text utilities: list splitting, dedup, pseudo detection.
//!
//! These are lexical helpers, not a selector parser. The pseudo check in
//! particular is a narrow prefix/suffix contract: it does not understand
//! attribute selectors, escapes, or colons inside bracketed expressions.
//! Selector text that doesn't fit the expected shapes simply fails to match
//! and is left untouched by the passes.

/// Split a comma-separated selector list into trimmed, non-empty parts.
///
/// `".a, .b ,"` becomes `[".a", ".b"]`.
pub fn split_selector_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Deduplicate selector parts, keeping the first occurrence of each.
pub fn unique_ordered(parts: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(parts.len());
    for part in parts {
        if !seen.contains(&part) {
            seen.push(part);
        }
    }
    seen
}

/// Is `candidate` a direct pseudo-class/element extension of `base`?
///
/// True iff `candidate` starts with the exact text of `base`, is longer, and
/// the remainder begins with one or two colons immediately followed by an
/// ASCII letter, hyphen, or underscore. So `a:hover` and `a::before` extend
/// `a`, but `a.x`, `a :hover`, and `a:::x` do not.
pub fn is_direct_pseudo_extension(base: &str, candidate: &str) -> bool {
    let Some(rest) = candidate.strip_prefix(base) else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    let colons = rest.chars().take_while(|&c| c == ':').count();
    if !(1..=2).contains(&colons) {
        return false;
    }
    rest[colons..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '-' || c == '_')
}
