//! Pattern predicates
//!
//! Patterns arrive either precompiled or as source text plus modifier
//! letters. Source text is compiled on every call.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, ValidatorError};

/// Pattern argument as seen by a `Pattern` predicate.
#[derive(Debug, Clone, Copy)]
pub enum PatternArg<'a> {
    /// A caller-compiled pattern; modifiers are ignored.
    Compiled(&'a Regex),
    /// Pattern source to compile with the supplied modifiers.
    Source(&'a str),
}

/// Compile pattern source with modifier letters.
///
/// Supported modifiers: `i` (case-insensitive), `m` (multi-line anchors),
/// `s` (dot matches newline), `y` (match must start at offset 0). `g`, `d`
/// and `u` are accepted and have no effect on whether a match exists.
///
/// `\d`, `\w`, `\b`, `\D` and `\W` are ASCII-only: `\d` matches `0-9` and
/// nothing else, `\w` matches `[0-9A-Za-z_]`. `\s` and `\B` keep their
/// Unicode meaning.
///
/// # Example
///
/// ```rust
/// use validex::predicate::compile;
///
/// let re = compile("^abc$", Some("i")).unwrap();
/// assert!(re.is_match("ABC"));
///
/// assert!(!compile(r"^\d$", None).unwrap().is_match("٣"));
/// assert!(compile("(", None).is_err());
/// assert!(compile("a", Some("x")).is_err());
/// ```
pub fn compile(source: &str, modifiers: Option<&str>) -> Result<Regex> {
    let mut case_insensitive = false;
    let mut multi_line = false;
    let mut dot_all = false;
    let mut sticky = false;
    let mut seen = String::new();

    for modifier in modifiers.unwrap_or_default().chars() {
        if seen.contains(modifier) {
            return Err(ValidatorError::malformed(
                source,
                format!("repeated modifier `{}`", modifier),
            ));
        }
        seen.push(modifier);

        match modifier {
            'i' => case_insensitive = true,
            'm' => multi_line = true,
            's' => dot_all = true,
            'y' => sticky = true,
            'g' | 'd' | 'u' => {}
            other => {
                return Err(ValidatorError::malformed(
                    source,
                    format!("unknown modifier `{}`", other),
                ))
            }
        }
    }

    let build = |text: &str| {
        RegexBuilder::new(text)
            .case_insensitive(case_insensitive)
            .multi_line(multi_line)
            .dot_matches_new_line(dot_all)
            .build()
            .map_err(|e| ValidatorError::malformed(source, e))
    };

    let translated = ascii_classes(source);
    let regex = build(&translated)?;
    if !sticky {
        return Ok(regex);
    }
    // Wrapping is only safe once the bare source is known to be balanced.
    build(&format!(r"\A(?:{})", translated))
}

/// Rewrite the Perl classes and word boundary to their ASCII forms, tracking
/// bracket depth since class members need the bare range.
fn ascii_classes(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&ascii_escape(escaped, depth > 0)),
                None => out.push('\\'),
            },
            '[' => {
                depth += 1;
                out.push('[');
            }
            ']' if depth > 0 => {
                depth -= 1;
                out.push(']');
            }
            _ => out.push(c),
        }
    }

    out
}

fn ascii_escape(escaped: char, in_class: bool) -> String {
    let replacement = match (escaped, in_class) {
        ('d', true) => "0-9",
        ('w', true) => "0-9A-Za-z_",
        ('d', false) => r"(?-u:\d)",
        ('w', false) => r"(?-u:\w)",
        ('b', false) => r"(?-u:\b)",
        ('D', false) => "[^0-9]",
        ('W', false) => "[^0-9A-Za-z_]",
        _ => return format!("\\{}", escaped),
    };
    replacement.to_string()
}

/// True iff the subject contains at least one match of the pattern.
///
/// # Example
///
/// ```rust
/// use validex::predicate::{pattern_matches, PatternArg};
///
/// assert_eq!(pattern_matches("Hello", PatternArg::Source("^h"), Some("i")), Ok(true));
/// assert_eq!(pattern_matches("Hello", PatternArg::Source("^h"), None), Ok(false));
/// ```
pub fn pattern_matches(
    subject: &str,
    pattern: PatternArg<'_>,
    modifiers: Option<&str>,
) -> Result<bool> {
    match pattern {
        PatternArg::Compiled(regex) => Ok(regex.is_match(subject)),
        PatternArg::Source(source) => Ok(compile(source, modifiers)?.is_match(subject)),
    }
}

/// Exact complement of [`pattern_matches`]; compilation errors propagate.
pub fn pattern_not_matches(
    subject: &str,
    pattern: PatternArg<'_>,
    modifiers: Option<&str>,
) -> Result<bool> {
    pattern_matches(subject, pattern, modifiers).map(|found| !found)
}
