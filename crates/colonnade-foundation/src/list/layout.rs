//! Multi-column masonry layout.
//!
//! Each new item goes to the currently shortest column, producing a
//! balanced grid. Placements are final for the lifetime of a
//! generation; a reset starts over with a fresh layout.

use smallvec::{smallvec, SmallVec};

use crate::geometry::{EdgeInsets, GeometryConfig};
use crate::ItemId;

/// Final position of one item within the list content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    pub item: ItemId,
    pub column: usize,
    /// Top edge, in content coordinates.
    pub origin_y: f32,
    pub height: f32,
}

impl ItemPlacement {
    pub fn bottom(&self) -> f32 {
        self.origin_y + self.height
    }
}

/// Shortest-column-first placement over a fixed number of columns.
#[derive(Clone, Debug)]
pub struct ColumnLayout {
    column_count: usize,
    vertical_item_margin: f32,
    horizontal_column_margin: f32,
    outer_padding: EdgeInsets,
    item_width: f32,
    /// Top edge of the item grid, below the outer padding and any
    /// header block.
    grid_top: f32,
    /// Bottom edge of the lowest item per column; `grid_top` while the
    /// column is empty.
    column_bottoms: SmallVec<[f32; 8]>,
    column_item_counts: SmallVec<[usize; 8]>,
    placements: Vec<ItemPlacement>,
}

impl ColumnLayout {
    pub fn new(config: &GeometryConfig, frame_width: f32, grid_top: f32) -> Self {
        Self {
            column_count: config.column_count,
            vertical_item_margin: config.vertical_item_margin,
            horizontal_column_margin: config.horizontal_column_margin,
            outer_padding: config.outer_padding,
            item_width: config.required_view_width(frame_width),
            grid_top,
            column_bottoms: smallvec![grid_top; config.column_count],
            column_item_counts: smallvec![0; config.column_count],
            placements: Vec::new(),
        }
    }

    /// Width every item view must match exactly.
    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    /// Number of items placed so far; also the next item identifier.
    pub fn item_count(&self) -> usize {
        self.placements.len()
    }

    pub fn placements(&self) -> &[ItemPlacement] {
        &self.placements
    }

    pub fn placement(&self, item: ItemId) -> Option<&ItemPlacement> {
        self.placements.get(item)
    }

    pub fn grid_top(&self) -> f32 {
        self.grid_top
    }

    /// Horizontal origin of a column band.
    pub fn column_x(&self, column: usize) -> f32 {
        self.outer_padding.left
            + column as f32 * (self.item_width + self.horizontal_column_margin)
    }

    /// Column with the lowest bottom edge; ties break toward the lower
    /// index.
    pub fn shortest_column(&self) -> (usize, f32) {
        let mut shortest = 0;
        let mut bottom = self.column_bottoms[0];
        for (column, &candidate) in self.column_bottoms.iter().enumerate().skip(1) {
            if candidate < bottom {
                shortest = column;
                bottom = candidate;
            }
        }
        (shortest, bottom)
    }

    /// Appends the next item to the shortest column.
    ///
    /// Items are dense: `item` must be the next unplaced identifier.
    /// The vertical margin is omitted above the first item of a
    /// column.
    pub fn place(&mut self, item: ItemId, view_height: f32) -> ItemPlacement {
        debug_assert_eq!(
            item,
            self.placements.len(),
            "items are placed densely in discovery order"
        );

        let (column, bottom) = self.shortest_column();
        let origin_y = if self.column_item_counts[column] == 0 {
            self.grid_top
        } else {
            bottom + self.vertical_item_margin
        };

        let placement = ItemPlacement {
            item,
            column,
            origin_y,
            height: view_height,
        };
        self.column_bottoms[column] = origin_y + view_height;
        self.column_item_counts[column] += 1;
        self.placements.push(placement);
        placement
    }

    /// Bottom edge of the tallest column (`grid_top` when empty).
    pub fn content_bottom(&self) -> f32 {
        self.column_bottoms
            .iter()
            .copied()
            .fold(self.grid_top, f32::max)
    }

    /// Content height including the bottom outer padding.
    pub fn content_height(&self) -> f32 {
        self.content_bottom() + self.outer_padding.bottom
    }

    /// The item whose column band and vertical span contain the point,
    /// if any.
    pub fn item_at_point(&self, x: f32, y: f32) -> Option<ItemId> {
        let stride = self.item_width + self.horizontal_column_margin;
        if stride <= 0.0 {
            return None;
        }
        let rel = x - self.outer_padding.left;
        if rel < 0.0 {
            return None;
        }
        let column = (rel / stride) as usize;
        if column >= self.column_count || rel - column as f32 * stride > self.item_width {
            return None;
        }
        self.placements
            .iter()
            .find(|p| p.column == column && p.origin_y <= y && y < p.bottom())
            .map(|p| p.item)
    }
}
