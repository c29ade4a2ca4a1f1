/// Suffix appended to every exported card file name.
pub const EXPORT_SUFFIX: &str = "-info-card.png";

/// Number of slug characters kept before [`EXPORT_SUFFIX`].
pub const SLUG_MAX_CHARS: usize = 10;

/// Split multi-line prompt input into one prompt per non-blank line.
///
/// Lines are kept verbatim (no trimming) so the rendered text matches what was typed.
pub fn parse_prompts(input: &str) -> Vec<String> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Derive the suggested export file name for a prompt.
///
/// Every character outside ASCII letters, digits and whitespace is dropped, each whitespace
/// run becomes a single `_`, the result is cut to [`SLUG_MAX_CHARS`] characters and
/// [`EXPORT_SUFFIX`] is appended. Whitespace is the ECMAScript `\s` set: U+FEFF counts,
/// U+0085 does not.
pub fn export_file_name(prompt: &str) -> String {
    let mut slug = String::with_capacity(prompt.len());
    let mut in_whitespace = false;
    for c in prompt
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || is_slug_whitespace(c))
    {
        if is_slug_whitespace(c) {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    let mut name: String = slug.chars().take(SLUG_MAX_CHARS).collect();
    name.push_str(EXPORT_SUFFIX);
    name
}

fn is_slug_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

#[cfg(test)]
#[path = "../../tests/unit/card/prompt.rs"]
mod tests;
