//! Typed placeholder and scalar literal rendering

use qweld_core::{Scalar, StringEscaper, Value, quote_identifier};

use crate::error::{RenderError, RenderResult};
use crate::specifier::SpecifierKind;

/// Render one scalar as literal SQL text.
///
/// The escaper is invoked for string scalars only; every other shape renders
/// without touching it.
pub fn render_scalar(scalar: &Scalar, escaper: &dyn StringEscaper) -> RenderResult<String> {
    match scalar {
        Scalar::Null => Ok("NULL".to_string()),
        Scalar::Int(v) => Ok(v.to_string()),
        Scalar::Float(v) => float_text(*v),
        Scalar::Bool(v) => Ok(if *v { "1" } else { "0" }.to_string()),
        Scalar::Str(s) => Ok(format!("'{}'", escaper.escape_string(s))),
    }
}

/// Render the argument bound to one placeholder.
pub fn render_specifier(
    value: &Value,
    kind: SpecifierKind,
    escaper: &dyn StringEscaper,
) -> RenderResult<String> {
    match kind {
        SpecifierKind::Int => Ok(cast_i64(value)?.to_string()),
        SpecifierKind::Float => float_text(cast_f64(value)?),
        SpecifierKind::Ident => render_identifier(value),
        SpecifierKind::Array => render_array(value, escaper),
        SpecifierKind::Bare => render_bare(value, escaper),
    }
}

/// Decimal text for a float. Rust's `Display` always uses `.` as the
/// separator, whatever the host locale.
fn float_text(v: f64) -> RenderResult<String> {
    if v.is_finite() {
        Ok(v.to_string())
    } else {
        Err(RenderError::Type(
            "invalid scalar value: non-finite float".to_string(),
        ))
    }
}

/// Numeric cast to a 64-bit integer with the loose semantics query authors
/// expect from `?d`: floats truncate toward zero, booleans become 0/1,
/// strings contribute their leading integer prefix, NULL becomes 0.
fn cast_i64(value: &Value) -> RenderResult<i64> {
    match value {
        Value::Null => Ok(0),
        Value::Int(v) => Ok(*v),
        Value::Float(v) => {
            if v.is_finite() {
                Ok(v.trunc() as i64)
            } else {
                Err(RenderError::Type(
                    "?d placeholder cannot take a non-finite float".to_string(),
                ))
            }
        }
        Value::Bool(v) => Ok(*v as i64),
        Value::Str(s) => Ok(int_prefix(s)),
        Value::Skip => Err(RenderError::OrphanSkip),
        other => Err(RenderError::Type(format!(
            "?d placeholder cannot take a {}",
            other.type_name()
        ))),
    }
}

/// Numeric cast to a float, mirroring `cast_i64`.
fn cast_f64(value: &Value) -> RenderResult<f64> {
    match value {
        Value::Null => Ok(0.0),
        Value::Int(v) => Ok(*v as f64),
        Value::Float(v) => Ok(*v),
        Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
        Value::Str(s) => Ok(float_prefix(s)),
        Value::Skip => Err(RenderError::OrphanSkip),
        other => Err(RenderError::Type(format!(
            "?f placeholder cannot take a {}",
            other.type_name()
        ))),
    }
}

/// Leading integer prefix of a string: optional sign then digits, after
/// leading whitespace. No digits parse as 0. Overflow saturates.
fn int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };
    let mut v: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        let digit = i64::from(bytes[i] - b'0');
        v = if negative {
            v.saturating_mul(10).saturating_sub(digit)
        } else {
            v.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }
    v
}

/// Leading float prefix of a string: optional sign, digits, fraction and
/// exponent, after leading whitespace. No digits parse as 0.
fn float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        let mut frac_digit = false;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
            frac_digit = true;
        }
        if saw_digit || frac_digit {
            end = frac;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let mut exp_digit = false;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
            exp_digit = true;
        }
        if exp_digit {
            end = exp;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// One backtick-quoted identifier fragment.
fn identifier_fragment(scalar: &Scalar) -> RenderResult<String> {
    match scalar {
        Scalar::Str(s) => Ok(quote_identifier(s)),
        Scalar::Int(v) => Ok(quote_identifier(&v.to_string())),
        Scalar::Float(v) => Ok(quote_identifier(&float_text(*v)?)),
        Scalar::Bool(v) => Ok(quote_identifier(if *v { "1" } else { "0" })),
        Scalar::Null => Err(RenderError::Type(
            "?# identifier cannot be NULL".to_string(),
        )),
    }
}

/// `?#`: one identifier, or a comma-joined identifier list (compound
/// clauses such as multi-column selects).
fn render_identifier(value: &Value) -> RenderResult<String> {
    match value {
        Value::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(identifier_fragment(item)?);
            }
            Ok(parts.join(", "))
        }
        Value::Map(_) => Err(RenderError::Type(
            "?# placeholder cannot take a map".to_string(),
        )),
        Value::Skip => Err(RenderError::OrphanSkip),
        other => {
            let Some(scalar) = other.as_scalar() else {
                return Err(RenderError::Type(format!(
                    "?# placeholder cannot take a {}",
                    other.type_name()
                )));
            };
            identifier_fragment(&scalar)
        }
    }
}

/// `?a`: comma-joined literals for a list, `` `key` = literal `` pairs in
/// insertion order for a map.
fn render_array(value: &Value, escaper: &dyn StringEscaper) -> RenderResult<String> {
    match value {
        Value::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(render_scalar(item, escaper)?);
            }
            Ok(parts.join(", "))
        }
        Value::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            for (key, entry) in entries {
                parts.push(format!(
                    "{} = {}",
                    quote_identifier(key),
                    render_scalar(entry, escaper)?
                ));
            }
            Ok(parts.join(", "))
        }
        Value::Skip => Err(RenderError::OrphanSkip),
        other => Err(RenderError::Type(format!(
            "?a placeholder requires a list or a map, got {}",
            other.type_name()
        ))),
    }
}

/// Bare `?`: a scalar literal, or a comma-joined expansion for containers.
/// Map keys are never rendered here; a map degrades to its values.
fn render_bare(value: &Value, escaper: &dyn StringEscaper) -> RenderResult<String> {
    match value {
        Value::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(render_scalar(item, escaper)?);
            }
            Ok(parts.join(", "))
        }
        Value::Map(entries) => {
            let mut parts = Vec::with_capacity(entries.len());
            for entry in entries.values() {
                parts.push(render_scalar(entry, escaper)?);
            }
            Ok(parts.join(", "))
        }
        Value::Skip => Err(RenderError::OrphanSkip),
        other => {
            let Some(scalar) = other.as_scalar() else {
                return Err(RenderError::Type(format!(
                    "cannot render {} as a scalar",
                    other.type_name()
                )));
            };
            render_scalar(&scalar, escaper)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_prefix_semantics() {
        assert_eq!(int_prefix("42abc"), 42);
        assert_eq!(int_prefix("  -7x"), -7);
        assert_eq!(int_prefix("+13"), 13);
        assert_eq!(int_prefix("abc"), 0);
        assert_eq!(int_prefix(""), 0);
        assert_eq!(int_prefix("99999999999999999999999"), i64::MAX);
        assert_eq!(int_prefix("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_float_prefix_semantics() {
        assert_eq!(float_prefix("3.5abc"), 3.5);
        assert_eq!(float_prefix("-2.25"), -2.25);
        assert_eq!(float_prefix(".5"), 0.5);
        assert_eq!(float_prefix("3."), 3.0);
        assert_eq!(float_prefix("1e3x"), 1000.0);
        assert_eq!(float_prefix("2e"), 2.0);
        assert_eq!(float_prefix("x1"), 0.0);
    }

    #[test]
    fn test_float_text_uses_period_separator() {
        assert_eq!(float_text(3.5).unwrap(), "3.5");
        assert_eq!(float_text(3.0).unwrap(), "3");
        assert_eq!(float_text(-0.25).unwrap(), "-0.25");
    }

    #[test]
    fn test_float_text_rejects_non_finite() {
        assert!(float_text(f64::NAN).is_err());
        assert!(float_text(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cast_i64_truncates_toward_zero() {
        assert_eq!(cast_i64(&Value::Float(3.9)).unwrap(), 3);
        assert_eq!(cast_i64(&Value::Float(-3.9)).unwrap(), -3);
        assert_eq!(cast_i64(&Value::Bool(true)).unwrap(), 1);
        assert_eq!(cast_i64(&Value::Null).unwrap(), 0);
    }

    #[test]
    fn test_cast_rejects_containers() {
        assert!(matches!(
            cast_i64(&Value::List(vec![])),
            Err(RenderError::Type(_))
        ));
        assert!(matches!(
            cast_f64(&Value::List(vec![])),
            Err(RenderError::Type(_))
        ));
    }
}
