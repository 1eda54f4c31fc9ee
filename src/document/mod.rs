//! Markdown rendering for the read-only view of the text surface.
//!
//! comrak parses the raw text; the renderer turns the tree into styled,
//! word-wrapped rows sized to the surface.

mod parser;
mod types;

pub use parser::{parse, parse_with_layout};
pub use types::{Document, InlineSpan, InlineStyle, LineType, RenderedLine};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_document_keeps_lines() {
        let doc = Document::from_plain_text("a\nb");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.rendered_text(), "a\nb");
        assert_eq!(*doc.line_at(1).unwrap().line_type(), LineType::Paragraph);
    }

    #[test]
    fn test_visible_lines_window() {
        let doc = Document::from_plain_text("1\n2\n3\n4");
        let visible: Vec<&str> = doc
            .visible_lines(1, 2)
            .into_iter()
            .map(RenderedLine::content)
            .collect();
        assert_eq!(visible, vec!["2", "3"]);
        assert!(doc.visible_lines(10, 2).is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.rendered_text(), "");
        assert!(doc.line_at(0).is_none());
    }
}
