//! Grid geometry: tile size and slot positions inside a screen area.

use crate::types::{Rect, Vec2, TILE_ASPECT};

/// Grid dimensions `(cols, rows)` for laying out `count` tiles as squarely as possible.
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = (count as f32).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    (cols, rows)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub tile_size: Vec2,
    pub padding: f32,
    pub bounds: Rect,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize, tile_size: Vec2, padding: f32, bounds: Rect) -> Self {
        Self {
            rows,
            cols,
            tile_size,
            padding,
            bounds,
        }
    }

    /// Largest tile size with the standard aspect ratio that fits `bounds`.
    pub fn fit(rows: usize, cols: usize, bounds: Rect, padding: f32) -> Self {
        let available_w = bounds.width - padding * (cols as f32 + 1.0);
        let available_h = bounds.height - padding * (rows as f32 + 1.0);

        let mut w = (available_w / cols.max(1) as f32).max(0.0);
        let mut h = (available_h / rows.max(1) as f32).max(0.0);

        if h > 0.0 && w / h > TILE_ASPECT {
            w = h * TILE_ASPECT;
        } else {
            h = w / TILE_ASPECT;
        }

        Self::new(rows, cols, Vec2::new(w, h), padding, bounds)
    }

    pub fn slot_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Top-left corner of every slot, row-major, with the grid centered in `bounds`.
    pub fn positions(&self) -> Vec<Vec2> {
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        let total_w = cols * self.tile_size.x + (cols - 1.0).max(0.0) * self.padding;
        let total_h = rows * self.tile_size.y + (rows - 1.0).max(0.0) * self.padding;

        let start_x = self.bounds.x + (self.bounds.width - total_w) / 2.0;
        let start_y = self.bounds.y + (self.bounds.height - total_h) / 2.0;

        let mut out = Vec::with_capacity(self.slot_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(Vec2::new(
                    start_x + col as f32 * (self.tile_size.x + self.padding),
                    start_y + row as f32 * (self.tile_size.y + self.padding),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(16), (4, 4));
        assert_eq!(grid_dimensions(36), (6, 6));
        assert_eq!(grid_dimensions(12), (4, 3));
        assert_eq!(grid_dimensions(0), (0, 0));
    }

    #[test]
    fn test_fit_keeps_aspect_and_fits() {
        let bounds = Rect::new(0.0, 0.0, 1024.0, 768.0);
        let layout = GridLayout::fit(4, 4, bounds, 10.0);
        let s = layout.tile_size;
        assert!((s.x / s.y - TILE_ASPECT).abs() < 1e-4);
        assert!(s.y * 4.0 + 10.0 * 5.0 <= 768.0 + 1e-3);
        assert!(s.x * 4.0 + 10.0 * 5.0 <= 1024.0 + 1e-3);
    }

    #[test]
    fn test_positions_are_centered_row_major() {
        let layout = GridLayout::new(
            2,
            2,
            Vec2::new(10.0, 10.0),
            2.0,
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        let p = layout.positions();
        assert_eq!(p.len(), 4);
        // Grid is 22x22, centered -> starts at 39.
        assert_eq!(p[0], Vec2::new(39.0, 39.0));
        assert_eq!(p[1], Vec2::new(51.0, 39.0));
        assert_eq!(p[2], Vec2::new(39.0, 51.0));
        assert_eq!(p[3], Vec2::new(51.0, 51.0));
    }
}
