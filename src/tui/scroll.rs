// Scroll state for TUI panels
//
// Each panel owns its scroll state. Auto-follow keeps streaming content
// (the log panel) pinned to the bottom until the user scrolls up.

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (item index at top of viewport)
    offset: usize,

    /// Total number of items in content
    total: usize,

    /// Number of items visible in viewport
    viewport: usize,

    /// Snap to the bottom whenever content changes.
    /// Scrolling up disables this; scrolling back to the bottom re-enables it.
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions; call each render frame
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Move the viewport the minimum distance that brings `index` into view
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows the viewport
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        // New content no longer drags the view down
        scroll.update_dimensions(25, 5);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_page_down_to_bottom_resumes_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.page_up();
        scroll.page_up();
        assert_eq!(scroll.offset(), 5);

        scroll.page_down();
        scroll.page_down();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.visible_range(), (15, 20));
    }

    #[test]
    fn test_ensure_visible() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(30, 10);
        assert_eq!(scroll.visible_range(), (0, 10));

        scroll.ensure_visible(12);
        assert_eq!(scroll.visible_range(), (3, 13));

        scroll.ensure_visible(1);
        assert_eq!(scroll.visible_range(), (1, 11));
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(30, 10);
        scroll.ensure_visible(29);

        scroll.update_dimensions(4, 10);
        assert_eq!(scroll.visible_range(), (0, 4));
    }
}
