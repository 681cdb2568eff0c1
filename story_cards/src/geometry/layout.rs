//! Centred-rows layout for slot anchors.

use serde::{Deserialize, Serialize};

use super::Point;

/// Lays slots out left to right in rows, each row centred horizontally
/// between the margins.
///
/// Anchors are the top-left corner of each cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Total width of the map background.
    pub width: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Gap between neighbouring cells, both horizontally and vertically.
    pub spacing: f64,
    pub margin_left: f64,
    pub margin_top: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            width: 1200.0,
            cell_width: 110.0,
            cell_height: 140.0,
            spacing: 10.0,
            margin_left: 25.0,
            margin_top: 25.0,
        }
    }
}

impl GridLayout {
    /// Width available for cells once both side margins are taken off.
    pub fn usable_width(&self) -> f64 {
        (self.width - 2.0 * self.margin_left).max(0.0)
    }

    /// How many cells fit in one row. Always at least one.
    pub fn cells_per_row(&self) -> usize {
        let pitch = self.cell_width + self.spacing;
        if pitch <= 0.0 {
            return 1;
        }
        let fit = ((self.usable_width() + self.spacing) / pitch).floor();
        if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        }
    }

    /// Compute the anchors of `count` slots in slot order.
    pub fn anchors(&self, count: usize) -> Vec<Point> {
        let per_row = self.cells_per_row();
        let usable = self.usable_width();
        let mut anchors = Vec::with_capacity(count);

        for index in 0..count {
            let row = index / per_row;
            let column = index % per_row;
            let in_row = per_row.min(count - row * per_row);

            let row_width =
                in_row as f64 * self.cell_width + (in_row.saturating_sub(1)) as f64 * self.spacing;
            let left = self.margin_left + ((usable - row_width) / 2.0).max(0.0);

            anchors.push(Point::new(
                left + column as f64 * (self.cell_width + self.spacing),
                self.margin_top + row as f64 * (self.cell_height + self.spacing),
            ));
        }

        anchors
    }
}
