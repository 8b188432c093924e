//! Template rendering engine

use qweld_core::{StringEscaper, Value};

use crate::blocks::resolve_blocks;
use crate::error::{RenderError, RenderResult};
use crate::render::render_specifier;
use crate::specifier::scan_specifiers;

/// Explicit forward cursor over the argument list.
///
/// Consumption order is part of the contract: placeholders take arguments
/// strictly left to right, one each.
struct ArgCursor<'a> {
    args: &'a [Value],
    next: usize,
}

impl<'a> ArgCursor<'a> {
    fn new(args: &'a [Value]) -> Self {
        Self { args, next: 0 }
    }

    fn next(&mut self) -> Option<&'a Value> {
        let value = self.args.get(self.next);
        if value.is_some() {
            self.next += 1;
        }
        value
    }

    fn remaining(&self) -> usize {
        self.args.len() - self.next
    }
}

/// Render `template` with `args` into a final literal query string.
///
/// Conditional blocks are resolved first; the surviving placeholders then
/// consume arguments left to right, each substituted with its rendered text.
/// Any violation aborts with a typed error; no partial output is returned.
#[tracing::instrument(
    skip(template, args, escaper),
    fields(template_preview = %template.chars().take(80).collect::<String>())
)]
pub fn render(
    template: &str,
    args: &[Value],
    escaper: &dyn StringEscaper,
) -> RenderResult<String> {
    let (resolved, args) = resolve_blocks(template, args)?;

    let specs = scan_specifiers(&resolved);
    let mut cursor = ArgCursor::new(&args);
    let mut out = String::with_capacity(resolved.len());
    let mut last_end = 0;

    for spec in &specs {
        let Some(value) = cursor.next() else {
            return Err(RenderError::Arity {
                expected: specs.len(),
                actual: args.len(),
            });
        };
        out.push_str(&resolved[last_end..spec.offset]);
        out.push_str(&render_specifier(value, spec.kind, escaper)?);
        last_end = spec.offset + spec.len;
    }
    out.push_str(&resolved[last_end..]);

    if cursor.remaining() > 0 {
        return Err(RenderError::Arity {
            expected: specs.len(),
            actual: args.len(),
        });
    }

    tracing::debug!(placeholders = specs.len(), "rendered template");
    Ok(out)
}

/// The skip sentinel, for callers to pass as an argument value.
pub fn skip() -> Value {
    Value::Skip
}
