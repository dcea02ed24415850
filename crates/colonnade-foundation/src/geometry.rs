//! Geometry configuration for a list generation.
//!
//! A generation (the period between two resets) captures its geometry
//! exactly once, right before the first layout pass, and keeps it
//! immutable afterwards. Column width is derived from the captured
//! values and the frame width, and every host-supplied item view must
//! match it exactly.

/// Default distance from the viewport's lower edge to the shortest
/// column's end below which more items are requested.
///
/// A zero trigger distance means the user must scroll past all loaded
/// content before a load starts, producing stop-and-go scrolling.
pub const DEFAULT_LOAD_TRIGGER_DISTANCE: f32 = 20.0;

/// Padding around the outside of the whole list content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    /// Zero padding on all edges.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same padding on all edges.
    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Combined left and right padding.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top and bottom padding.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Immutable geometry snapshot for one generation.
///
/// Captured from the data source once per generation; the host must
/// not change its answers until the next reset.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryConfig {
    /// Number of columns. Zero is treated as an unanswered required
    /// query and fails the first layout pass.
    pub column_count: usize,

    /// Padding around the whole grid, including decorations positioned
    /// inside it.
    pub outer_padding: EdgeInsets,

    /// Vertical gap between two items in the same column. Omitted
    /// above the first item of each column.
    pub vertical_item_margin: f32,

    /// Horizontal gap between adjacent columns. Not applied at the
    /// outer edges.
    pub horizontal_column_margin: f32,

    /// See [`DEFAULT_LOAD_TRIGGER_DISTANCE`].
    pub load_trigger_distance: f32,
}

impl GeometryConfig {
    /// Width every item view must have, given the frame width.
    ///
    /// Columns split the width left over after the outer left/right
    /// padding and the `(column_count - 1)` inter-column margins.
    pub fn required_view_width(&self, frame_width: f32) -> f32 {
        let margins = self.horizontal_column_margin * (self.column_count as f32 - 1.0);
        (frame_width - self.outer_padding.horizontal() - margins) / self.column_count as f32
    }
}
