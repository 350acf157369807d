//! Document model: cards, columns and the in-memory board store.
//!
//! The board holds exactly two ordered columns. Cards are created once when
//! the board is seeded and are never created or destroyed afterwards; only
//! their column membership and order change. Every card id appears exactly
//! once across both columns, and [`Board::validate`] checks that against the
//! id set captured at construction.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::consts::{CARD_LIGHTNESS_PCT, CARD_SATURATION_PCT, CARDS_PER_COLUMN};

/// Unique identifier for a card. Assigned once at creation.
pub type CardId = u32;

/// One of the two columns on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// Left column, labelled "Column 1".
    A,
    /// Right column, labelled "Column 2".
    B,
}

impl ColumnId {
    /// Both columns, in hit-test and display order.
    pub const ALL: [ColumnId; 2] = [ColumnId::A, ColumnId::B];

    /// Heading shown above the column.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "Column 1",
            Self::B => "Column 2",
        }
    }

    /// Short key used in `data-column` attributes.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// A draggable card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Stable unique identifier.
    pub id: CardId,
    /// CSS color string, fixed for the card's lifetime.
    pub color: String,
    /// Free-form horizontal offset. Not used by the column layout; reset on drop.
    pub x: f64,
    /// Free-form vertical offset. Not used by the column layout; reset on drop.
    pub y: f64,
}

impl Card {
    #[must_use]
    pub fn new(id: CardId, color: impl Into<String>) -> Self {
        Self { id, color: color.into(), x: 0.0, y: 0.0 }
    }

    /// Text shown on the card face.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Card {}", self.id)
    }
}

/// A random pastel `hsl()` color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue: f64 = rng.random_range(0.0..360.0);
    format!("hsl({hue:.1}, {CARD_SATURATION_PCT}%, {CARD_LIGHTNESS_PCT}%)")
}

/// Errors raised when the board's id-set invariant would be violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The same card id appears more than once.
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
    /// The card id is not on the board.
    #[error("card {0} is not on the board")]
    UnknownCard(CardId),
    /// A card from the original id set is no longer on the board.
    #[error("card {0} is missing from both columns")]
    MissingCard(CardId),
}

/// Where a card ended up after [`Board::move_card`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub from: ColumnId,
    pub from_index: usize,
    pub to: ColumnId,
    pub to_index: usize,
}

impl Placement {
    /// Whether the card ended where it started.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.from == self.to && self.from_index == self.to_index
    }
}

/// Card ids per column, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub a: Vec<CardId>,
    pub b: Vec<CardId>,
}

/// In-memory store of both columns.
#[derive(Debug, Clone)]
pub struct Board {
    columns: [Vec<Card>; 2],
    ids: Vec<CardId>,
}

impl Board {
    /// Seed the board with ids `1..=4` in column A and `5..=8` in column B,
    /// each with a random color.
    pub fn seeded<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a: Vec<Card> = (1..=CARDS_PER_COLUMN)
            .map(|id| Card::new(id, random_color(rng)))
            .collect();
        let b: Vec<Card> = (CARDS_PER_COLUMN + 1..=CARDS_PER_COLUMN * 2)
            .map(|id| Card::new(id, random_color(rng)))
            .collect();
        let mut ids: Vec<CardId> = a.iter().chain(b.iter()).map(|c| c.id).collect();
        ids.sort_unstable();
        Self { columns: [a, b], ids }
    }

    /// Build a board from explicit columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateCard`] if any id appears twice.
    #[cfg(test)]
    pub fn from_columns(a: Vec<Card>, b: Vec<Card>) -> Result<Self, BoardError> {
        let mut seen = HashSet::new();
        for card in a.iter().chain(b.iter()) {
            if !seen.insert(card.id) {
                return Err(BoardError::DuplicateCard(card.id));
            }
        }
        let mut ids: Vec<CardId> = seen.into_iter().collect();
        ids.sort_unstable();
        Ok(Self { columns: [a, b], ids })
    }

    /// Cards of a column in display order.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> &[Card] {
        &self.columns[column.slot()]
    }

    /// Number of cards in a column.
    #[must_use]
    pub fn len(&self, column: ColumnId) -> usize {
        self.columns[column.slot()].len()
    }

    /// Column and index of a card.
    #[must_use]
    pub fn locate(&self, id: CardId) -> Option<(ColumnId, usize)> {
        ColumnId::ALL.into_iter().find_map(|column| {
            self.column(column)
                .iter()
                .position(|c| c.id == id)
                .map(|index| (column, index))
        })
    }

    #[cfg(test)]
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        let (column, index) = self.locate(id)?;
        self.column(column).get(index)
    }

    /// Move a card to `index` in column `to`.
    ///
    /// `index` is an insertion index into the target column as it looks
    /// *before* the card is removed. For a reorder within the same column the
    /// removal shifts later slots up by one, so an index strictly greater than
    /// the card's current position is decremented. The card's free-form
    /// offsets are reset to zero.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownCard`] if the card is not on the board.
    pub fn move_card(&mut self, id: CardId, to: ColumnId, index: usize) -> Result<Placement, BoardError> {
        let (from, from_index) = self.locate(id).ok_or(BoardError::UnknownCard(id))?;
        let mut card = self.columns[from.slot()].remove(from_index);
        card.x = 0.0;
        card.y = 0.0;

        let mut to_index = index;
        if from == to && to_index > from_index {
            to_index -= 1;
        }
        let target = &mut self.columns[to.slot()];
        let to_index = to_index.min(target.len());
        target.insert(to_index, card);

        Ok(Placement { from, from_index, to, to_index })
    }

    /// Zero a card's free-form offsets without moving it.
    pub fn reset_position(&mut self, id: CardId) {
        if let Some((column, index)) = self.locate(id) {
            let card = &mut self.columns[column.slot()][index];
            card.x = 0.0;
            card.y = 0.0;
        }
    }

    /// Check that every id from the fixed set appears exactly once.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen = HashSet::new();
        for card in self.columns.iter().flatten() {
            if !seen.insert(card.id) {
                return Err(BoardError::DuplicateCard(card.id));
            }
            if self.ids.binary_search(&card.id).is_err() {
                return Err(BoardError::UnknownCard(card.id));
            }
        }
        match self.ids.iter().find(|id| !seen.contains(id)) {
            Some(id) => Err(BoardError::MissingCard(*id)),
            None => Ok(()),
        }
    }

    /// Current order of both columns.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let ids = |column: ColumnId| -> Vec<CardId> { self.column(column).iter().map(|c| c.id).collect() };
        BoardSnapshot { a: ids(ColumnId::A), b: ids(ColumnId::B) }
    }
}
