//! Error types with rich diagnostics using miette
//!
//! Criteria documents are authored by hand, so parse failures carry
//! source spans pointing at the offending JSON.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised while loading a criteria document
#[derive(Error, Diagnostic, Debug)]
pub enum RubricError {
    #[error("malformed criteria document: {message}")]
    #[diagnostic(code(sketchgrade::rubric::malformed))]
    Malformed {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse failed here")]
        span: SourceSpan,
    },

    #[error("unknown graph: {name}")]
    #[diagnostic(
        code(sketchgrade::rubric::unknown_graph),
        help("graph names are matched exactly against the catalog keys")
    )]
    UnknownGraph { name: String },

    #[error("invalid fill color: {value}")]
    #[diagnostic(
        code(sketchgrade::rubric::invalid_color),
        help("expected a hex color like #rrggbb or #rgb")
    )]
    InvalidColor { value: String },
}

impl RubricError {
    /// Build a `Malformed` error from a serde_json failure, converting its
    /// 1-based line/column into a byte span into `source`.
    pub fn malformed(name: &str, source: &str, err: &serde_json::Error) -> RubricError {
        let offset = byte_offset(source, err.line(), err.column());
        RubricError::Malformed {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from(offset..offset),
        }
    }
}

/// Byte offset of a 1-based (line, column) position. Clamps to the end of
/// the text when the position is past it.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut remaining = line.saturating_sub(1);
    let mut offset = 0;
    for (idx, c) in source.char_indices() {
        if remaining == 0 {
            break;
        }
        if c == '\n' {
            remaining -= 1;
            offset = idx + 1;
        }
    }
    (offset + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_finds_position() {
        let src = "ab\ncde\nf";
        assert_eq!(byte_offset(src, 1, 1), 0);
        assert_eq!(byte_offset(src, 2, 3), 5);
        assert_eq!(byte_offset(src, 3, 1), 7);
        assert_eq!(byte_offset(src, 9, 99), src.len());
    }

    #[test]
    fn malformed_carries_span() {
        let source = "{\n  \"lines\": [,]\n}";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let rubric_err = RubricError::malformed("graphs.json", source, &err);
        let RubricError::Malformed { span, .. } = rubric_err else {
            panic!("expected Malformed");
        };
        assert!(span.offset() > 0 && span.offset() <= source.len());
    }
}
