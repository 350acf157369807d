//! Rendering: turns engine state into a scene and paints it into the DOM.
//!
//! [`Scene::build`] is a pure view model of what should be on screen: each
//! column's cards in order, the floating position of the dragged card, the
//! drop placeholder, and the spotlight overlay. [`paint`] is the only place
//! that touches the DOM; it rebuilds the board subtree from a scene and does
//! not mutate any engine state.
//!
//! All fallible DOM calls propagate errors via `Result<(), JsValue>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement};

use crate::consts::{
    CARD_GAP_PX, CARD_HEIGHT_PX, CARD_RADIUS_PX, CARD_WIDTH_PX, COLUMN_MIN_HEIGHT_PX, COLUMN_WIDTH_PX,
    OVERLAY_RADIUS_PX,
};
use crate::doc::{CardId, ColumnId};
use crate::engine::EngineCore;
use crate::geom::Point;

/// A card as it should appear on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: CardId,
    pub color: String,
    pub label: String,
    /// Viewport position of the card's top-left corner while it is being
    /// dragged; `None` when it sits in the column flow.
    pub floating: Option<Point>,
}

/// One entry in a column's rendered list.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Card(CardView),
    /// Drop indicator at the current insertion index.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub items: Vec<Item>,
}

/// Everything the board shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub columns: Vec<ColumnView>,
    /// Pointer position the dimming overlay is centered on, while dragging.
    pub overlay: Option<Point>,
}

impl Scene {
    #[must_use]
    pub fn build(core: &EngineCore) -> Self {
        let session = core.session();
        let columns = ColumnId::ALL
            .into_iter()
            .map(|column| {
                let mut items: Vec<Item> = core
                    .board()
                    .column(column)
                    .iter()
                    .map(|card| {
                        let floating = session
                            .filter(|s| s.card == card.id)
                            .map(|s| s.card_origin());
                        Item::Card(CardView { id: card.id, color: card.color.clone(), label: card.label(), floating })
                    })
                    .collect();
                if let Some(target) = core.drop_target().filter(|t| t.column == column) {
                    items.insert(target.index.min(items.len()), Item::Placeholder);
                }
                ColumnView { id: column, items }
            })
            .collect();
        Self { columns, overlay: session.map(|s| s.pointer) }
    }
}

// =============================================================
// Styles
// =============================================================

#[must_use]
pub fn board_style() -> String {
    "display: flex; justify-content: space-between; gap: 40px; margin: 40px 80px 0;".to_string()
}

#[must_use]
pub fn column_style() -> String {
    format!(
        "display: flex; flex-direction: column; align-items: center; gap: {CARD_GAP_PX}px; \
         width: {COLUMN_WIDTH_PX}px; min-height: {COLUMN_MIN_HEIGHT_PX}px; padding: 16px; \
         border: 2px dashed #9ca3af; box-sizing: border-box;"
    )
}

#[must_use]
pub fn heading_style() -> String {
    "margin: 0 0 8px; height: 24px; line-height: 24px; text-align: center; font-weight: 600;".to_string()
}

#[must_use]
pub fn card_style(card: &CardView) -> String {
    let base = format!(
        "display: flex; align-items: center; justify-content: center; flex-shrink: 0; \
         width: {CARD_WIDTH_PX}px; height: {CARD_HEIGHT_PX}px; border-radius: {CARD_RADIUS_PX}px; \
         background-color: {}; color: #fff; font-weight: 700; font-size: 1.25rem; \
         user-select: none; cursor: move;",
        card.color
    );
    match card.floating {
        Some(pt) => format!("{base} position: fixed; left: {}px; top: {}px; z-index: 20;", pt.x, pt.y),
        None => format!("{base} position: relative;"),
    }
}

#[must_use]
pub fn placeholder_style() -> String {
    format!(
        "flex-shrink: 0; width: {CARD_WIDTH_PX}px; height: {CARD_HEIGHT_PX}px; \
         border-radius: {CARD_RADIUS_PX}px; border: 2px dashed #6b7280; box-sizing: border-box;"
    )
}

/// Full-viewport dimming layer with a clear spotlight at `pt`. Never
/// intercepts pointer events.
#[must_use]
pub fn overlay_style(pt: Point) -> String {
    format!(
        "position: fixed; inset: 0; pointer-events: none; z-index: 10; \
         background: radial-gradient(circle {OVERLAY_RADIUS_PX}px at {}px {}px, \
         transparent 0%, transparent 40%, rgba(0,0,0,0.6) 70%);",
        pt.x, pt.y
    )
}

// =============================================================
// DOM
// =============================================================

/// Replace the contents of `root` with the board described by `scene`.
///
/// # Errors
///
/// Returns `Err` if `root` is detached or any DOM call fails.
pub fn paint(root: &HtmlElement, scene: &Scene) -> Result<(), JsValue> {
    let document = root
        .owner_document()
        .ok_or_else(|| JsValue::from_str("board root is not attached to a document"))?;

    let board = element(&document, "div", "board", &board_style())?;
    for column in &scene.columns {
        let column_el = paint_column(&document, column)?;
        board.append_child(&column_el)?;
    }
    if let Some(pt) = scene.overlay {
        let overlay = element(&document, "div", "board__overlay", &overlay_style(pt))?;
        board.append_child(&overlay)?;
    }

    root.set_inner_html("");
    root.append_child(&board)?;
    Ok(())
}

fn paint_column(document: &Document, column: &ColumnView) -> Result<Element, JsValue> {
    let el = element(document, "div", "board__column", &column_style())?;
    el.set_attribute("data-column", column.id.key())?;

    let heading = element(document, "h3", "board__heading", &heading_style())?;
    heading.set_text_content(Some(column.id.label()));
    el.append_child(&heading)?;

    for item in &column.items {
        let child = match item {
            Item::Card(card) => {
                let card_el = element(document, "div", "board__card", &card_style(card))?;
                card_el.set_attribute("data-card-id", &card.id.to_string())?;
                card_el.set_text_content(Some(&card.label));
                card_el
            }
            Item::Placeholder => element(document, "div", "board__placeholder", &placeholder_style())?,
        };
        el.append_child(&child)?;
    }
    Ok(el)
}

fn element(document: &Document, tag: &str, class: &str, style: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("class", class)?;
    el.set_attribute("style", style)?;
    Ok(el)
}
