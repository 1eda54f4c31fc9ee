//! Viewport management for scrolling.
//!
//! A [`Viewport`] tracks which rows of a line-based view are on screen.
//! The editor uses one for buffer lines and one for rendered markdown lines.

use std::ops::Range;

/// Manages the visible portion of a list of lines.
///
/// # Example
///
/// ```
/// use mdpad::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(20, 100);
/// assert_eq!(vp.visible_range(), 0..20);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..30);
///
/// vp.reveal(5);
/// assert_eq!(vp.offset(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// Index of the first visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Visible line range, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    /// Scroll the minimum amount needed to bring `line` on screen.
    pub const fn reveal(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 {
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length (e.g., after an edit or re-render).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_with_short_content() {
        let vp = Viewport::new(24, 10);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_page_moves_by_height() {
        let mut vp = Viewport::new(10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_reveal_below_scrolls_minimally() {
        let mut vp = Viewport::new(10, 100);
        vp.reveal(15);
        assert_eq!(vp.offset(), 6);
        vp.reveal(8);
        assert_eq!(vp.offset(), 6);
        vp.reveal(2);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(70);
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26);
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(10, 30);
        vp.scroll_down(20);
        vp.resize(25);
        assert_eq!(vp.offset(), 5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                scroll_amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(height, total_lines);
                vp.scroll_down(scroll_amount);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(height as usize));
            }

            #[test]
            fn revealed_line_is_visible(
                total_lines in 1..1000usize,
                height in 1..50u16,
                line_seed in 0..1000usize,
            ) {
                let line = line_seed % total_lines;
                let mut vp = Viewport::new(height, total_lines);
                vp.reveal(line);
                prop_assert!(vp.visible_range().contains(&line));
            }
        }
    }
}
