use tracing::{debug, warn};

use super::buffer::EditorBuffer;
use crate::document::Document;

/// How the text surface presents the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Editable plain text.
    #[default]
    Raw,
    /// Read-only markdown rendering of the raw text.
    Markdown,
}

impl DisplayMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Markdown => "Markdown",
        }
    }
}

/// The text surface: the document buffer plus its display mode.
///
/// In markdown mode the raw text is captured as a snapshot and rendered;
/// the buffer stays untouched until the surface returns to raw mode.
#[derive(Debug, Default)]
pub struct TextSurface {
    buffer: EditorBuffer,
    mode: DisplayMode,
    snapshot: Option<String>,
    rendered: Option<Document>,
}

impl TextSurface {
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: EditorBuffer::from_text(text),
            ..Self::default()
        }
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == DisplayMode::Markdown
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    /// Mutable access to the buffer, denied while read-only.
    pub fn buffer_mut(&mut self) -> Option<&mut EditorBuffer> {
        if self.is_read_only() {
            None
        } else {
            Some(&mut self.buffer)
        }
    }

    /// The rendered document, present only in markdown mode.
    pub const fn rendered(&self) -> Option<&Document> {
        self.rendered.as_ref()
    }

    /// The document text. Always the raw text, whatever the mode.
    pub fn text(&self) -> String {
        match &self.snapshot {
            Some(snapshot) => snapshot.clone(),
            None => self.buffer.text(),
        }
    }

    pub fn char_count(&self) -> usize {
        match &self.snapshot {
            Some(snapshot) => snapshot.chars().count(),
            None => self.buffer.char_count(),
        }
    }

    /// Flip between raw and markdown display.
    pub fn toggle_markdown(&mut self, width: u16) {
        match self.mode {
            DisplayMode::Raw => {
                let snapshot = self.buffer.text();
                self.rendered = Some(render(&snapshot, width));
                self.snapshot = Some(snapshot);
                self.mode = DisplayMode::Markdown;
            }
            DisplayMode::Markdown => {
                self.rendered = None;
                if let Some(snapshot) = self.snapshot.take()
                    && snapshot != self.buffer.text()
                {
                    self.buffer.set_text(&snapshot);
                }
                self.mode = DisplayMode::Raw;
            }
        }
        debug!(mode = ?self.mode, "display mode toggled");
    }

    /// Replace the whole document.
    ///
    /// In markdown mode the snapshot and rendering follow the new text.
    pub fn replace_document(&mut self, text: &str, width: u16) {
        self.buffer.set_text(text);
        if self.mode == DisplayMode::Markdown {
            self.snapshot = Some(text.to_string());
            self.rendered = Some(render(text, width));
        }
    }

    /// Re-wrap the rendering for a new width.
    pub fn rerender(&mut self, width: u16) {
        if let Some(snapshot) = &self.snapshot {
            self.rendered = Some(render(snapshot, width));
        }
    }

    pub fn undo(&mut self) -> bool {
        self.buffer_mut().is_some_and(EditorBuffer::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.buffer_mut().is_some_and(EditorBuffer::redo)
    }

    pub const fn mark_clean(&mut self) {
        self.buffer.mark_clean();
    }
}

fn render(source: &str, width: u16) -> Document {
    match Document::parse_with_layout(source, width) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("markdown rendering failed, showing plain text: {err:#}");
            Document::from_plain_text(source)
        }
    }
}
