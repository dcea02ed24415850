//! Scroll position state for the list viewport.
//!
//! Tracks the vertical offset of the viewport over the list content,
//! clamped to the scrollable range derived from content height minus
//! viewport height. Gesture handling and animation live in the
//! platform adapter; this is just the position the engine lays out
//! against.

/// Clamped scroll offset over the list content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    offset: f32,
    viewport_height: f32,
    max_offset: f32,
}

impl ScrollPosition {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
            max_offset: 0.0,
        }
    }

    /// Current offset of the viewport's top edge, in content
    /// coordinates.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Largest reachable offset: content height minus viewport height,
    /// floored at zero.
    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// The span of content the viewport currently covers.
    pub fn window(&self) -> (f32, f32) {
        (self.offset, self.offset + self.viewport_height)
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
    }

    /// Updates the scrollable range from the latest content height.
    /// The offset is re-clamped so it stays valid when content
    /// shrinks.
    pub fn set_content_height(&mut self, content_height: f32) {
        self.max_offset = (content_height - self.viewport_height).max(0.0);
        self.offset = self.offset.min(self.max_offset);
    }

    /// Moves to the target offset, clamped to `[0, max_offset]`.
    /// Returns whether the offset actually changed.
    pub fn scroll_to(&mut self, target: f32) -> bool {
        let clamped = target.clamp(0.0, self.max_offset);
        if clamped != self.offset {
            self.offset = clamped;
            true
        } else {
            false
        }
    }

    /// Back to the top with an empty scrollable range.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.max_offset = 0.0;
    }
}
