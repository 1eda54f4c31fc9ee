use ropey::Rope;

/// Maximum number of undo steps kept per buffer.
pub const HISTORY_LIMIT: usize = 256;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Kind of the most recent edit, used to coalesce typing into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Insert,
    Other,
}

/// Buffer state captured before an edit.
#[derive(Debug, Clone)]
struct Snapshot {
    rope: Rope,
    cursor: Cursor,
}

/// A text buffer backed by a rope data structure.
///
/// Holds the whole document, the cursor, and a linear undo history.
/// Snapshots share rope nodes, so recording one per edit step is cheap.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    last_edit: Option<(EditKind, usize)>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_edit: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole content.
    ///
    /// The cursor moves to the start and undo/redo history is cleared.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_edit = None;
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Number of Unicode scalar values in the buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        let content = line
            .strip_suffix("\r\n")
            .or_else(|| line.strip_suffix('\n'))
            .or_else(|| line.strip_suffix('\r'))
            .unwrap_or(&line);
        Some(content.to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Whether there is an edit to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is an undone edit to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.split_line();
            return;
        }
        self.record(EditKind::Insert);
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.place_cursor_at_char(char_idx + 1);
        self.touch(EditKind::Insert);
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.record(EditKind::Other);
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);
        self.place_cursor_at_char(char_idx + s.chars().count());
        self.touch(EditKind::Other);
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.record(EditKind::Other);
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.place_cursor_at_char(char_idx + 1);
        self.touch(EditKind::Other);
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        self.record(EditKind::Other);

        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            // A CRLF pair is one line break.
            let start = if char_idx >= 2
                && self.rope.char(char_idx - 1) == '\n'
                && self.rope.char(char_idx - 2) == '\r'
            {
                char_idx - 2
            } else {
                char_idx - 1
            };
            self.rope.remove(start..char_idx);
            self.place_cursor_at_char(start);
        } else {
            self.rope.remove(char_idx - 1..char_idx);
            self.place_cursor_at_char(char_idx - 1);
        }
        self.touch(EditKind::Other);
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let char_idx = self.cursor_char_idx();
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        self.record(EditKind::Other);
        let end = if self.rope.char(char_idx) == '\r'
            && self.rope.get_char(char_idx + 1) == Some('\n')
        {
            char_idx + 2
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.place_cursor_at_char(char_idx);
        self.touch(EditKind::Other);
        true
    }

    /// Revert the most recent edit step.
    ///
    /// Returns `true` if the buffer changed.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.swap_in(snapshot);
        self.redo_stack.push(current);
        true
    }

    /// Re-apply the most recently undone edit step.
    ///
    /// Returns `true` if the buffer changed.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.swap_in(snapshot);
        self.undo_stack.push(current);
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.last_edit = None;
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.last_edit = None;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.last_edit = None;
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.last_edit = None;
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let trimmed = line[..self.cursor.col].trim_end();
        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.last_edit = None;
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column.
    ///
    /// Both are clamped, and a column inside a multi-byte character snaps
    /// back to the character start.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.last_edit = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.last_edit = None;
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.last_edit = None;
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    /// Push an undo snapshot unless this edit continues the current step.
    fn record(&mut self, kind: EditKind) {
        let continues = kind == EditKind::Insert
            && self.last_edit == Some((EditKind::Insert, self.cursor.line));
        if continues {
            return;
        }
        self.undo_stack.push(Snapshot {
            rope: self.rope.clone(),
            cursor: self.cursor,
        });
        if self.undo_stack.len() > HISTORY_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    const fn touch(&mut self, kind: EditKind) {
        self.dirty = true;
        self.last_edit = Some((kind, self.cursor.line));
    }

    fn swap_in(&mut self, snapshot: Snapshot) -> Snapshot {
        let current = Snapshot {
            rope: std::mem::replace(&mut self.rope, snapshot.rope),
            cursor: self.cursor,
        };
        self.cursor = snapshot.cursor;
        self.dirty = true;
        self.last_edit = None;
        current
    }

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line_str = self.line_at(self.cursor.line).unwrap_or_default();
        let mut byte_col = self.cursor.col.min(line_str.len());
        while !line_str.is_char_boundary(byte_col) {
            byte_col -= 1;
        }
        line_start + line_str[..byte_col].chars().count()
    }

    /// Put the cursor on the rope char index `char_idx`.
    fn place_cursor_at_char(&mut self, char_idx: usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self.rope.slice(line_start..char_idx).len_bytes();
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if self.cursor.col < line.len() {
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.clamp_to_memory();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.clamp_to_memory();
        }
    }

    fn clamp_to_memory(&mut self) {
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = self.cursor.col_memory.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.col = col;
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.char_count(), 0);
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_char_count_counts_scalars_not_bytes() {
        let buf = EditorBuffer::from_text("héllo\n");
        assert_eq!(buf.char_count(), 6);
    }

    #[test]
    fn test_cursor_starts_at_origin() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Dirty tracking ---

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = EditorBuffer::from_text("hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_marks_dirty_and_mark_clean_resets() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('!');
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("helloé".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 7));
    }

    #[test]
    fn test_insert_newline_char_splits_line() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_char('\n');
        assert_eq!(buf.text(), "a\nb");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_str_multi_line_moves_cursor() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_str("one\ntwo");
        assert_eq!(buf.text(), "one\ntwo");
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_str("");
        assert!(!buf.is_dirty());
        assert!(!buf.can_undo());
    }

    // --- Line splitting and deletion ---

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("hello\r\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        buf.delete_back();
        assert_eq!(buf.line_at(0), Some("caf".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_vertical_move_snaps_to_char_boundary() {
        let mut buf = EditorBuffer::from_text("abc\néé");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_move_word_left_and_right() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_move_word_left_after_multibyte_separator() {
        let mut buf = EditorBuffer::from_text("a—b");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, "a—".len());
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Undo / redo ---

    #[test]
    fn test_typing_run_undoes_as_one_step() {
        let mut buf = EditorBuffer::from_text("");
        for ch in "hello".chars() {
            buf.insert_char(ch);
        }
        assert!(buf.undo());
        assert_eq!(buf.text(), "");
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_cursor_move_breaks_typing_run() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_char('a');
        buf.move_home();
        buf.insert_char('b');
        assert_eq!(buf.text(), "ba");
        buf.undo();
        assert_eq!(buf.text(), "a");
        buf.undo();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_deletes_are_separate_steps() {
        let mut buf = EditorBuffer::from_text("abc");
        buf.move_end();
        buf.delete_back();
        buf.delete_back();
        buf.undo();
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_undo_restores_cursor() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.split_line();
        buf.undo();
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_redo_reapplies_undone_edit() {
        let mut buf = EditorBuffer::from_text("x");
        buf.move_end();
        buf.insert_str("yz");
        buf.undo();
        assert!(buf.redo());
        assert_eq!(buf.text(), "xyz");
        assert!(!buf.redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_char('a');
        buf.undo();
        assert!(buf.can_redo());
        buf.insert_char('b');
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut buf = EditorBuffer::from_text("keep");
        assert!(!buf.undo());
        assert_eq!(buf.text(), "keep");
    }

    #[test]
    fn test_set_text_clears_history_and_resets_cursor() {
        let mut buf = EditorBuffer::from_text("old");
        buf.move_end();
        buf.insert_char('!');
        buf.set_text("new\ntext");
        assert_eq!(buf.text(), "new\ntext");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert!(!buf.can_undo());
        assert!(!buf.undo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut buf = EditorBuffer::from_text("");
        for _ in 0..(HISTORY_LIMIT + 10) {
            buf.split_line();
        }
        let mut steps = 0;
        while buf.undo() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_LIMIT);
    }

    // --- Line breaks other than LF ---

    #[test]
    fn test_form_feed_is_not_a_line_break() {
        let mut buf = EditorBuffer::from_text("a\x0Cb");
        assert_eq!(buf.line_count(), 1);
        buf.move_end();
        buf.insert_char('x');
        assert_eq!(buf.text(), "a\x0Cbx");
    }

    #[test]
    fn test_unicode_separators_stay_inside_line() {
        let buf = EditorBuffer::from_text("one\u{2028}two\u{85}three");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0).unwrap(), "one\u{2028}two\u{85}three");
    }

    #[test]
    fn test_backspace_after_form_feed_then_type() {
        let mut buf = EditorBuffer::from_text("a\x0C\né");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.insert_char('x');
        assert_eq!(buf.text(), "a\x0Cxé");
    }

    #[test]
    fn test_lone_cr_is_one_line_break() {
        let mut buf = EditorBuffer::from_text("ab\rcd");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0).unwrap(), "ab");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    proptest! {
        #[test]
        fn prop_insert_then_undo_restores_text(
            original in "[a-zé \\n\\r\\x0C\u{2028}]{0,40}",
            typed in "[a-zé]{1,20}",
            line in 0usize..5,
            col in 0usize..10,
        ) {
            let mut buf = EditorBuffer::from_text(&original);
            buf.move_to(line, col);
            for ch in typed.chars() {
                buf.insert_char(ch);
            }
            prop_assert_eq!(buf.char_count(), original.chars().count() + typed.chars().count());
            prop_assert!(buf.undo());
            prop_assert_eq!(buf.text(), original);
        }

        #[test]
        fn prop_edits_keep_cursor_on_char_boundary(
            original in "[a-zé \\n\\r\\x0C\u{2028}]{0,40}",
            ops in proptest::collection::vec(0u8..8, 0..40),
        ) {
            let mut buf = EditorBuffer::from_text(&original);
            for op in ops {
                match op {
                    0 => { buf.delete_back(); }
                    1 => { buf.delete_forward(); }
                    2 => buf.insert_char('é'),
                    3 => buf.split_line(),
                    4 => buf.move_cursor(Direction::Left),
                    5 => buf.move_cursor(Direction::Right),
                    6 => buf.move_cursor(Direction::Up),
                    _ => buf.move_cursor(Direction::Down),
                }
                let cursor = buf.cursor();
                prop_assert!(cursor.line < buf.line_count());
                let line = buf.line_at(cursor.line).unwrap_or_default();
                prop_assert!(cursor.col <= line.len());
                prop_assert!(line.is_char_boundary(cursor.col));
                prop_assert_eq!(buf.char_count(), buf.text().chars().count());
            }
        }
    }
}
