//! Text handling for human-entered identity strings.
//!
//! Free-text names cross two trust boundaries: they become part of persisted
//! records and part of rendered markup. `is_valid_name` is the single gate a
//! name must pass at every such boundary; `escape_html` is the single escaping
//! routine for anything shown to a user.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum trimmed length of a peer name.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum trimmed length of a peer name.
pub const NAME_MAX_LEN: usize = 50;

/// Accepted name characters: ASCII letters and digits, whitespace, hyphen,
/// period, and the Spanish accented vowels plus enye, either case.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9\s\-.áéíóúñ]+$").expect("valid name pattern")
});

/// Escapes text for safe interpolation into HTML.
///
/// Maps `&`, `<`, `>`, `"` and `'` to their entity forms; everything else
/// passes through unchanged. Escaping is single-pass: calling it on already
/// escaped text is the caller's bug, not this function's.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decides whether a free-text identity string is well-formed.
///
/// The trimmed value must be [`NAME_MIN_LEN`] to [`NAME_MAX_LEN`] characters
/// drawn from the accepted set. Everything else is rejected, including any
/// HTML metacharacter, braces, quotes, and semicolons.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN || len > NAME_MAX_LEN {
        return false;
    }
    NAME_PATTERN.is_match(trimmed)
}

/// Uppercases the leading letter of each word, preserving the rest.
///
/// Words are delimited by whitespace, hyphens, and periods, the separators
/// the name validator accepts. Uppercasing is Unicode-aware, so names that
/// begin with an accented letter capitalize too.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() || c == '-' || c == '.' {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
