//! The substitution primitive used by replace rules.
//! Rebuilds a string by splicing a replacement over every pattern match,
//! with optional token indirection and case preservation.

use indexmap::IndexMap;

use crate::pattern::Pattern;

/// Replaces every non-overlapping match of `find` in `text` with the
/// effective replacement value.
///
/// The effective value is resolved once, before scanning: if `replace` is a
/// key in `tokens` the token's value is used, otherwise `replace` itself.
/// Every match of one call therefore sees the same resolved value.
///
/// With `maintain_case` enabled, each spliced replacement is reshaped to
/// mimic the casing of the text it replaces (see [`match_case`]).
///
/// # Arguments
/// * `text` - Input text; never mutated
/// * `find` - Pattern to locate matches with
/// * `replace` - Replacement literal or token name
/// * `tokens` - Token dictionary for replacement indirection
/// * `maintain_case` - Whether to reshape the replacement's casing per match
///
/// # Returns
/// * `String` - The rebuilt text, with untouched spans preserved
pub fn substitute(
    text: &str,
    find: &Pattern,
    replace: &str,
    tokens: &IndexMap<String, String>,
    maintain_case: bool,
) -> String {
    let resolved = tokens.get(replace).map(String::as_str).unwrap_or(replace);

    let mut output = String::with_capacity(text.len());
    let mut last_position = 0;
    for (start, end) in find.find_ranges(text) {
        output.push_str(&text[last_position..start]);
        if maintain_case {
            output.push_str(&match_case(&text[start..end], resolved));
        } else {
            output.push_str(resolved);
        }
        last_position = end;
    }
    output.push_str(&text[last_position..]);
    output
}

/// Reshapes `replacement` to mimic the casing of `original`.
///
/// Policy, in order:
/// 1. `original` entirely upper-case: upper-case the whole replacement
/// 2. `original` entirely lower-case: lower-case the whole replacement
/// 3. `original` a simple capitalized word (first letter upper-case,
///    remaining letters lower-case): capitalize only the replacement's
///    first letter
/// 4. anything else (mixed or irregular casing): replacement unchanged
pub fn match_case(original: &str, replacement: &str) -> String {
    if original == original.to_uppercase() {
        return replacement.to_uppercase();
    }
    if original == original.to_lowercase() {
        return replacement.to_lowercase();
    }

    let mut chars = original.chars();
    let capitalized = chars
        .next()
        .is_some_and(|first| first.is_uppercase())
        && chars.all(|c| !c.is_alphabetic() || c.is_lowercase());
    if capitalized {
        let mut replacement_chars = replacement.chars();
        return match replacement_chars.next() {
            Some(first) => first.to_uppercase().chain(replacement_chars).collect(),
            None => String::new(),
        };
    }

    replacement.to_string()
}
