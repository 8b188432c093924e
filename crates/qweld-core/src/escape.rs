//! String escaping capability
//!
//! The template engine never decides how to neutralize string content on its
//! own: it calls whatever `StringEscaper` the caller supplies, the same way a
//! live connection would expose its server-side escaping. The engine invokes
//! the escaper for string scalars only; numbers, booleans, NULL and
//! identifier fragments never pass through it.

/// Raw-string to safely-quotable-string capability.
///
/// The returned text is interpolated between single quotes, so an
/// implementation must guarantee the result cannot terminate the surrounding
/// quotes early, whatever the input contains.
pub trait StringEscaper {
    /// Escape `raw` for interpolation inside a single-quoted SQL literal.
    fn escape_string(&self, raw: &str) -> String;
}

/// Backslash-style escaper matching `mysql_real_escape_string`.
///
/// Escapes NUL, backspace, tab, LF, CR, Ctrl-Z, `'`, `"` and `\`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlEscaper;

impl StringEscaper for MysqlEscaper {
    fn escape_string(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\u{8}' => out.push_str("\\b"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\u{1a}' => out.push_str("\\Z"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        }
        out
    }
}

/// Quote-doubling escaper for ANSI-conformant backends (PostgreSQL, SQLite).
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiQuoteEscaper;

impl StringEscaper for AnsiQuoteEscaper {
    fn escape_string(&self, raw: &str) -> String {
        raw.replace('\'', "''")
    }
}

/// Backtick-quote an identifier (column name, etc.), doubling embedded
/// backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_escaper_neutralizes_quotes_and_backslashes() {
        let esc = MysqlEscaper;
        assert_eq!(esc.escape_string("O'Brien"), "O\\'Brien");
        assert_eq!(esc.escape_string("a\\b"), "a\\\\b");
        assert_eq!(esc.escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(esc.escape_string("line\nbreak"), "line\\nbreak");
        assert_eq!(esc.escape_string("nul\0byte"), "nul\\0byte");
    }

    #[test]
    fn test_mysql_escaper_leaves_plain_text_alone() {
        assert_eq!(MysqlEscaper.escape_string("plain text 123"), "plain text 123");
    }

    #[test]
    fn test_ansi_escaper_doubles_single_quotes() {
        let esc = AnsiQuoteEscaper;
        assert_eq!(esc.escape_string("O'Brien"), "O''Brien");
        assert_eq!(esc.escape_string("no quotes"), "no quotes");
    }

    #[test]
    fn test_quote_identifier_doubles_backticks() {
        assert_eq!(quote_identifier("name"), "`name`");
        assert_eq!(quote_identifier("weird`col"), "`weird``col`");
    }
}
