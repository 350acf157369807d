//! Shared numeric constants for the board crate.
//!
//! Pixel values match the stylesheet in `render`; the insertion-index math
//! assumes cards are laid out at a fixed pitch below the column header.

// ── Cards ───────────────────────────────────────────────────────

/// Rendered card width in CSS pixels.
pub const CARD_WIDTH_PX: f64 = 200.0;

/// Rendered card height in CSS pixels.
pub const CARD_HEIGHT_PX: f64 = 150.0;

/// Vertical gap between consecutive cards in a column.
pub const CARD_GAP_PX: f64 = 20.0;

/// Distance from one card's top edge to the next card's top edge.
pub const CARD_PITCH_PX: f64 = CARD_HEIGHT_PX + CARD_GAP_PX;

/// Corner radius of a card.
pub const CARD_RADIUS_PX: f64 = 8.0;

/// Number of cards each column is seeded with.
pub const CARDS_PER_COLUMN: u32 = 4;

// ── Columns ─────────────────────────────────────────────────────

/// Column width in CSS pixels.
pub const COLUMN_WIDTH_PX: f64 = 300.0;

/// Minimum column height, so an empty column still accepts drops.
pub const COLUMN_MIN_HEIGHT_PX: f64 = 400.0;

/// Offset from a column's top edge to the top of its first card:
/// border (2) + padding (16) + heading (24) + heading margin (8) + card gap (20).
pub const COLUMN_HEADER_PX: f64 = 70.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Radius of the clear spotlight around the pointer while dragging.
pub const OVERLAY_RADIUS_PX: f64 = 150.0;

// ── Colors ──────────────────────────────────────────────────────

/// Saturation used for generated card colors, in percent.
pub const CARD_SATURATION_PCT: u8 = 70;

/// Lightness used for generated card colors, in percent.
pub const CARD_LIGHTNESS_PCT: u8 = 70;
