//! Drop-target resolution: which column the pointer is over, and where in
//! that column a released card would land.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CARD_PITCH_PX, COLUMN_HEADER_PX};
use crate::doc::ColumnId;
use crate::geom::{Point, Rect};

/// A resolved drop location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Column under the pointer.
    pub column: ColumnId,
    /// Insertion index into that column's current list.
    pub index: usize,
}

/// Last measured on-screen rectangle of each column.
///
/// `None` means the column has not been measured (not yet rendered, or the
/// measurement came back unusable).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnBounds {
    a: Option<Rect>,
    b: Option<Rect>,
}

impl ColumnBounds {
    /// Record a column's rectangle. Unusable geometry is stored as `None`.
    pub fn set(&mut self, column: ColumnId, rect: Option<Rect>) {
        let rect = rect.filter(Rect::is_usable);
        match column {
            ColumnId::A => self.a = rect,
            ColumnId::B => self.b = rect,
        }
    }

    #[must_use]
    pub fn get(&self, column: ColumnId) -> Option<Rect> {
        match column {
            ColumnId::A => self.a,
            ColumnId::B => self.b,
        }
    }
}

/// The column whose rectangle contains `pt`, testing column A first.
#[must_use]
pub fn column_at(pt: Point, bounds: &ColumnBounds) -> Option<(ColumnId, Rect)> {
    ColumnId::ALL
        .into_iter()
        .find_map(|column| bounds.get(column).filter(|rect| rect.contains(pt)).map(|rect| (column, rect)))
}

/// Insertion index for a pointer at viewport height `y` over a column whose
/// top edge is `column_top` and which currently holds `len` cards.
///
/// Above the first card the index is 0. Otherwise the pointer falls in slot
/// `floor(rel / pitch)`; the lower half of a slot advances the index by one.
/// The result is clamped to `[0, len]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn insertion_index(column_top: f64, y: f64, len: usize) -> usize {
    let rel = y - column_top - COLUMN_HEADER_PX;
    if !rel.is_finite() || rel < 0.0 {
        return 0;
    }
    let slot = (rel / CARD_PITCH_PX).floor();
    let rem = rel - slot * CARD_PITCH_PX;
    let advance = if rem >= CARD_PITCH_PX / 2.0 { 1.0 } else { 0.0 };
    let candidate = slot + advance;
    if candidate >= len as f64 { len } else { candidate as usize }
}

/// Resolve the drop target for `pt`, given each column's current length.
#[must_use]
pub fn drop_target(pt: Point, bounds: &ColumnBounds, len_of: impl Fn(ColumnId) -> usize) -> Option<DropTarget> {
    let (column, rect) = column_at(pt, bounds)?;
    Some(DropTarget { column, index: insertion_index(rect.top, pt.y, len_of(column)) })
}
