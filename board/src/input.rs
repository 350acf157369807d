//! Input model: mouse buttons and the drag state machine.
//!
//! `DragState` is the gesture tracked between pointer-down and pointer-up.
//! The dragged card is referenced by id and stays in its column until the
//! drop is committed, so the board is never observed with a card missing.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{CardId, ColumnId};
use crate::geom::Point;
use crate::hit::DropTarget;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// An in-progress drag of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Id of the card being dragged.
    pub card: CardId,
    /// Column the card was picked up from.
    pub origin: ColumnId,
    /// Pointer position minus the card's top-left corner at pick-up.
    pub offset: Point,
    /// Most recent pointer position.
    pub pointer: Point,
    /// Where the card would land if released now; `None` when over no column.
    pub target: Option<DropTarget>,
}

impl DragSession {
    /// Top-left corner at which the floating card is drawn.
    #[must_use]
    pub fn card_origin(&self) -> Point {
        self.pointer.sub(self.offset)
    }
}

/// State of the drag state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging(DragSession),
}

impl DragState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}
