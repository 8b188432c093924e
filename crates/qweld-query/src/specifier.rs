//! Placeholder token scanning

use regex::Regex;
use std::sync::LazyLock;

/// Rendering discipline of a placeholder token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `?` - rendered by the argument's own shape
    Bare,
    /// `?d` - numeric cast to a 64-bit integer
    Int,
    /// `?f` - numeric cast to a float
    Float,
    /// `?a` - list or map expansion
    Array,
    /// `?#` - backtick-quoted identifier or identifier list
    Ident,
}

impl SpecifierKind {
    /// The literal token text, used in error messages.
    pub fn token(&self) -> &'static str {
        match self {
            SpecifierKind::Bare => "?",
            SpecifierKind::Int => "?d",
            SpecifierKind::Float => "?f",
            SpecifierKind::Array => "?a",
            SpecifierKind::Ident => "?#",
        }
    }
}

/// A placeholder occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specifier {
    /// Byte offset of the `?`
    pub offset: usize,
    /// Token length in bytes
    pub len: usize,
    /// Rendering discipline
    pub kind: SpecifierKind,
}

static SPECIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?([dfa#])?").expect("valid regex"));

/// Scan a template for placeholder tokens, in order of appearance.
///
/// The grammar is `?` optionally followed by one of `d`, `f`, `a`, `#`.
/// Any other character after `?` is ordinary template text, so `?x` is a
/// bare placeholder followed by a literal `x`.
pub fn scan_specifiers(template: &str) -> Vec<Specifier> {
    let mut specs = Vec::new();
    for cap in SPECIFIER_REGEX.captures_iter(template) {
        if let Some(whole) = cap.get(0) {
            let kind = match cap.get(1).map(|m| m.as_str()) {
                Some("d") => SpecifierKind::Int,
                Some("f") => SpecifierKind::Float,
                Some("a") => SpecifierKind::Array,
                Some("#") => SpecifierKind::Ident,
                _ => SpecifierKind::Bare,
            };
            specs.push(Specifier {
                offset: whole.start(),
                len: whole.len(),
                kind,
            });
        }
    }
    specs
}
