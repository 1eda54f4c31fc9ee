//! Rendered markdown: styled display lines produced from source text.

/// The markdown rendering of a text surface.
///
/// Only display lines are kept. The raw text stays with the editor buffer,
/// which is the single source of truth for the character count and saving.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<RenderedLine>,
}

impl Document {
    pub(crate) const fn from_lines(lines: Vec<RenderedLine>) -> Self {
        Self { lines }
    }

    /// One unstyled paragraph line per source line.
    pub fn from_plain_text(source: &str) -> Self {
        Self::from_lines(
            source
                .lines()
                .map(|line| RenderedLine::new(line.to_string(), LineType::Paragraph))
                .collect(),
        )
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// At most `count` lines starting at `offset`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// The rendering as plain text, lines joined with `\n`.
    pub fn rendered_text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line.content);
        }
        text
    }
}

/// One display row of the rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self::with_spans(content, line_type, Vec::new())
    }

    /// A row whose `content` is the concatenation of `spans`.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Styled runs, or `None` when the row is drawn in its base style only.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        (!self.spans.is_empty()).then_some(self.spans.as_slice())
    }
}

/// Inline emphasis active on a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A run of text sharing one [`InlineStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Block kind of a rendered row; picks the base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Paragraph,
    /// Level 1 to 6
    Heading(u8),
    CodeBlock,
    BlockQuote,
    /// Nesting depth, starting at 0
    ListItem(usize),
    Table,
    HorizontalRule,
    /// Alt-text placeholder for an image-only paragraph
    Image,
    Empty,
}
