//! Conditional block resolution
//!
//! A `{ ... }` span contributes its clause only when the argument bound to
//! its single placeholder is not the skip sentinel. Resolution is one
//! structural pass: brace spans and placeholder ordinals are collected
//! against the original byte offsets, every edit is decided up front, and
//! the edits are applied back to front so earlier offsets never drift.

use qweld_core::Value;

use crate::error::{RenderError, StructuralError};
use crate::specifier::{Specifier, scan_specifiers};

/// A brace-delimited span and the ordinal of the one placeholder inside it.
#[derive(Debug, Clone, Copy)]
struct Block {
    open: usize,
    close: usize,
    spec_ordinal: usize,
}

/// Collect every conditional block, validating brace structure and the
/// one-placeholder-per-block rule.
fn find_blocks(template: &str, specs: &[Specifier]) -> Result<Vec<Block>, StructuralError> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    // Braces are ASCII, so byte positions are safe even in UTF-8 text.
    for (i, byte) in template.bytes().enumerate() {
        match byte {
            b'{' => match open {
                Some(_) => return Err(StructuralError::NestedOpen(i)),
                None => open = Some(i),
            },
            b'}' => match open.take() {
                Some(start) => {
                    let inside: Vec<usize> = specs
                        .iter()
                        .enumerate()
                        .filter(|(_, s)| s.offset > start && s.offset < i)
                        .map(|(ordinal, _)| ordinal)
                        .collect();
                    if inside.len() != 1 {
                        return Err(StructuralError::PlaceholderCount {
                            start,
                            end: i + 1,
                            found: inside.len(),
                        });
                    }
                    blocks.push(Block {
                        open: start,
                        close: i,
                        spec_ordinal: inside[0],
                    });
                }
                None => return Err(StructuralError::UnmatchedClose(i)),
            },
            _ => {}
        }
    }

    if let Some(start) = open {
        return Err(StructuralError::UnclosedOpen(start));
    }
    Ok(blocks)
}

/// Resolve every conditional block in `template`.
///
/// Returns the rewritten template and the argument list with consumed skip
/// sentinels removed. Placeholder ordinals count against the original
/// template, left to right; a missing argument is not a skip (arity is the
/// renderer's check, not ours).
pub fn resolve_blocks(
    template: &str,
    args: &[Value],
) -> Result<(String, Vec<Value>), RenderError> {
    let specs = scan_specifiers(template);
    let blocks = find_blocks(template, &specs)?;

    let mut deletions: Vec<std::ops::Range<usize>> = Vec::new();
    let mut consumed = vec![false; args.len()];
    let mut in_block = vec![false; specs.len()];

    for block in &blocks {
        in_block[block.spec_ordinal] = true;
        let elide = args.get(block.spec_ordinal).is_some_and(Value::is_skip);
        if elide {
            deletions.push(block.open..block.close + 1);
            consumed[block.spec_ordinal] = true;
        } else {
            deletions.push(block.open..block.open + 1);
            deletions.push(block.close..block.close + 1);
        }
    }

    for ordinal in 0..specs.len() {
        if !in_block[ordinal] && args.get(ordinal).is_some_and(Value::is_skip) {
            return Err(RenderError::OrphanSkip);
        }
    }

    tracing::trace!(
        blocks = blocks.len(),
        elided = consumed.iter().filter(|c| **c).count(),
        "resolved conditional blocks"
    );

    let mut rewritten = template.to_string();
    deletions.sort_by_key(|range| std::cmp::Reverse(range.start));
    for range in deletions {
        rewritten.replace_range(range, "");
    }

    let kept: Vec<Value> = args
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed[*i])
        .map(|(_, value)| value.clone())
        .collect();

    // A skip sentinel still present was never consumed by any block.
    if kept.iter().any(Value::is_skip) {
        return Err(RenderError::OrphanSkip);
    }

    Ok((rewritten, kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_kept_strips_braces_only() {
        let (sql, args) =
            resolve_blocks("WHERE 1=1 {AND block = ?d}", &[Value::Int(0)]).unwrap();
        assert_eq!(sql, "WHERE 1=1 AND block = ?d");
        assert_eq!(args, vec![Value::Int(0)]);
    }

    #[test]
    fn test_block_elided_drops_span_and_argument() {
        let (sql, args) =
            resolve_blocks("WHERE 1=1 {AND block = ?d}", &[Value::Skip]).unwrap();
        assert_eq!(sql, "WHERE 1=1 ");
        assert_eq!(args, Vec::<Value>::new());
    }

    #[test]
    fn test_arguments_reindex_after_elision() {
        let (sql, args) = resolve_blocks(
            "a = ?{ AND b = ?d} AND c = ?",
            &[Value::Int(1), Value::Skip, Value::Int(3)],
        )
        .unwrap();
        assert_eq!(sql, "a = ? AND c = ?");
        assert_eq!(args, vec![Value::Int(1), Value::Int(3)]);
    }

    #[test]
    fn test_mixed_blocks_resolve_in_one_pass() {
        let (sql, args) = resolve_blocks(
            "{x = ?} AND {y = ?d} AND {z = ?f}",
            &[Value::Skip, Value::Int(2), Value::Skip],
        )
        .unwrap();
        assert_eq!(sql, " AND y = ?d AND ");
        assert_eq!(args, vec![Value::Int(2)]);
    }

    #[test]
    fn test_nested_open_is_structural_error() {
        let err = resolve_blocks("{a {b ?} }", &[Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Structural(StructuralError::NestedOpen(3))
        );
    }

    #[test]
    fn test_unmatched_close_is_structural_error() {
        let err = resolve_blocks("a ?} b", &[Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Structural(StructuralError::UnmatchedClose(3))
        );
    }

    #[test]
    fn test_unclosed_open_is_structural_error() {
        let err = resolve_blocks("{a ? b", &[Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Structural(StructuralError::UnclosedOpen(0))
        );
    }

    #[test]
    fn test_block_without_placeholder_is_structural_error() {
        let err = resolve_blocks("{no placeholder}", &[]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Structural(StructuralError::PlaceholderCount {
                start: 0,
                end: 16,
                found: 0,
            })
        );
    }

    #[test]
    fn test_block_with_two_placeholders_is_structural_error() {
        let err =
            resolve_blocks("{? and ?d}", &[Value::Int(1), Value::Int(2)]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Structural(StructuralError::PlaceholderCount { found: 2, .. })
        ));
    }

    #[test]
    fn test_skip_outside_any_block_is_orphan() {
        let err = resolve_blocks("a = ?", &[Value::Skip]).unwrap_err();
        assert_eq!(err, RenderError::OrphanSkip);
    }

    #[test]
    fn test_leftover_skip_in_argument_list_is_orphan() {
        // One placeholder, two arguments; the trailing skip is never consumed.
        let err = resolve_blocks("{a = ?}", &[Value::Int(1), Value::Skip]).unwrap_err();
        assert_eq!(err, RenderError::OrphanSkip);
    }

    #[test]
    fn test_missing_argument_is_not_a_skip() {
        // Too few arguments: the block is kept and arity is reported later.
        let (sql, args) = resolve_blocks("{a = ?d}", &[]).unwrap();
        assert_eq!(sql, "a = ?d");
        assert_eq!(args, Vec::<Value>::new());
    }

    #[test]
    fn test_multibyte_text_around_blocks() {
        let (sql, args) =
            resolve_blocks("имя = ? {И флаг = ?d}", &[Value::Int(1), Value::Skip]).unwrap();
        assert_eq!(sql, "имя = ? ");
        assert_eq!(args, vec![Value::Int(1)]);
    }
}
