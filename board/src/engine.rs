use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use crate::doc::{Board, CardId, ColumnId};
use crate::geom::{Point, Rect};
use crate::hit::{self, ColumnBounds, DropTarget};
use crate::input::{Button, DragSession, DragState};
use crate::render::{self, Scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The card moved to another column.
    Moved { from: ColumnId, to: ColumnId, index: usize },
    /// The card changed position within its own column.
    Reordered { column: ColumnId, from: usize, to: usize },
    /// The card was dropped back onto its own slot.
    Unchanged,
    /// Released outside both columns, or abandoned.
    Cancelled,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DragStarted { card: CardId },
    /// Suppress the browser's text selection and native drag for this event.
    PreventDefault,
    DropTargetChanged(Option<DropTarget>),
    DragEnded { card: CardId, outcome: DropOutcome },
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub board: Board,
    pub input: DragState,
    pub bounds: ColumnBounds,
}

impl EngineCore {
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self { board, input: DragState::Idle, bounds: ColumnBounds::default() }
    }

    /// A freshly seeded board whose card colors derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Board::seeded(&mut StdRng::seed_from_u64(seed)))
    }

    // --- Geometry ---

    /// Record the on-screen rectangle of a column. `None` or degenerate
    /// geometry makes the column an invalid drop target.
    pub fn set_column_bounds(&mut self, column: ColumnId, rect: Option<Rect>) {
        self.bounds.set(column, rect);
    }

    fn resolve(&self, pointer: Point) -> Option<DropTarget> {
        hit::drop_target(pointer, &self.bounds, |column| self.board.len(column))
    }

    // --- Input events ---

    /// Pick up `card`. `card_rect` is the card's on-screen rectangle, used to
    /// keep the grab point fixed relative to the card while it floats.
    ///
    /// Only the primary button starts a drag. A pointer-down that arrives
    /// while a drag is still active cancels the stale drag first.
    pub fn on_pointer_down(&mut self, card: CardId, card_rect: Rect, pointer: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some((origin, _)) = self.board.locate(card) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if let Some(stale) = self.abandon() {
            actions.push(stale);
        }

        let offset = if card_rect.is_usable() { pointer.sub(card_rect.top_left()) } else { Point::default() };
        let target = self.resolve(pointer);
        self.input = DragState::Dragging(DragSession { card, origin, offset, pointer, target });

        actions.push(Action::DragStarted { card });
        actions.push(Action::PreventDefault);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Track the pointer and recompute the drop target. No-op when idle.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        let target = self.resolve(pointer);
        let DragState::Dragging(session) = &mut self.input else {
            return Vec::new();
        };
        session.pointer = pointer;

        let mut actions = Vec::new();
        if session.target != target {
            session.target = target;
            actions.push(Action::DropTargetChanged(target));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Commit the drag at the final pointer position and return to idle.
    /// No-op when idle.
    pub fn on_pointer_up(&mut self, pointer: Point) -> Vec<Action> {
        let DragState::Dragging(session) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let card = session.card;

        let outcome = match self.resolve(pointer) {
            Some(target) => match self.board.move_card(card, target.column, target.index) {
                Ok(placement) if placement.is_unchanged() => DropOutcome::Unchanged,
                Ok(placement) if placement.from == placement.to => DropOutcome::Reordered {
                    column: placement.to,
                    from: placement.from_index,
                    to: placement.to_index,
                },
                Ok(placement) => DropOutcome::Moved { from: placement.from, to: placement.to, index: placement.to_index },
                Err(err) => {
                    log::warn!("drop of card {card} rejected: {err}");
                    DropOutcome::Cancelled
                }
            },
            None => {
                self.board.reset_position(card);
                DropOutcome::Cancelled
            }
        };

        if let Err(err) = self.board.validate() {
            log::error!("board invariant broken after dropping card {card}: {err}");
        }
        log::debug!("card {card} dropped: {outcome:?}");
        vec![Action::DragEnded { card, outcome }, Action::RenderNeeded]
    }

    /// Abandon an active drag, leaving the card where it was. No-op when idle.
    pub fn cancel(&mut self) -> Vec<Action> {
        match self.abandon() {
            Some(ended) => vec![ended, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    fn abandon(&mut self) -> Option<Action> {
        let DragState::Dragging(session) = std::mem::take(&mut self.input) else {
            return None;
        };
        self.board.reset_position(session.card);
        log::debug!("drag of card {} cancelled", session.card);
        Some(Action::DragEnded { card: session.card, outcome: DropOutcome::Cancelled })
    }

    // --- Queries ---

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.input.session()
    }

    /// Where the dragged card would land if released now.
    #[must_use]
    pub fn drop_target(&self) -> Option<DropTarget> {
        self.session().and_then(|s| s.target)
    }
}

/// The full board engine. Wraps `EngineCore` and owns the root DOM element
/// the board is painted into.
pub struct Engine {
    root: HtmlElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine that paints into `root`.
    #[must_use]
    pub fn new(root: HtmlElement, seed: u64) -> Self {
        Self { root, core: EngineCore::with_seed(seed) }
    }

    // --- Input events ---

    /// Handle `mousedown` anywhere inside the root; only presses on a card
    /// element (`data-card-id`) start a drag.
    ///
    /// # Errors
    ///
    /// Returns `Err` if repainting fails.
    pub fn on_mouse_down(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        let Some(card_el) = card_element(ev) else {
            return Ok(());
        };
        let Some(card) = card_el.get_attribute("data-card-id") else {
            return Ok(());
        };
        let Ok(card) = card.parse::<CardId>() else {
            log::warn!("ignoring card element with malformed id {card:?}");
            return Ok(());
        };
        self.measure_columns();
        let actions = self.core.on_pointer_down(card, rect_of(&card_el), pointer_of(ev), Button::from_dom(ev.button()));
        self.apply(Some(ev), actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if repainting fails.
    pub fn on_mouse_move(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.measure_columns();
        let actions = self.core.on_pointer_move(pointer_of(ev));
        self.apply(Some(ev), actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if repainting fails.
    pub fn on_mouse_up(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.measure_columns();
        let actions = self.core.on_pointer_up(pointer_of(ev));
        self.apply(Some(ev), actions)
    }

    /// # Errors
    ///
    /// Returns `Err` if repainting fails.
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        let actions = self.core.cancel();
        self.apply(None, actions)
    }

    // --- Render ---

    /// Rebuild the board's DOM from the current state.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any DOM call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::paint(&self.root, &Scene::build(&self.core))
    }

    fn apply(&mut self, ev: Option<&MouseEvent>, actions: Vec<Action>) -> Result<(), JsValue> {
        let mut render = false;
        for action in actions {
            match action {
                Action::PreventDefault => {
                    if let Some(ev) = ev {
                        let event: &Event = ev;
                        event.prevent_default();
                    }
                }
                Action::RenderNeeded => render = true,
                Action::DragStarted { card } => log::debug!("drag started: card {card}"),
                Action::DropTargetChanged(target) => log::trace!("drop target: {target:?}"),
                Action::DragEnded { card, outcome } => log::info!("card {card}: {outcome:?}"),
            }
        }
        if render {
            self.render()?;
        }
        Ok(())
    }

    /// Re-measure both columns so layout changes since the last event are seen.
    fn measure_columns(&mut self) {
        for column in ColumnId::ALL {
            let selector = format!("[data-column=\"{}\"]", column.key());
            let rect = match self.root.query_selector(&selector) {
                Ok(Some(el)) => Some(rect_of(&el)),
                Ok(None) => None,
                Err(err) => {
                    log::warn!("column {} lookup failed: {err:?}", column.key());
                    None
                }
            };
            self.core.set_column_bounds(column, rect);
        }
    }
}

fn pointer_of(ev: &MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

fn card_element(ev: &MouseEvent) -> Option<Element> {
    let target = ev.target()?;
    let el = target.dyn_ref::<Element>()?;
    match el.closest("[data-card-id]") {
        Ok(found) => found,
        Err(err) => {
            log::warn!("card lookup failed: {err:?}");
            None
        }
    }
}
