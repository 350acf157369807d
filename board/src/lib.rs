//! Drag-and-drop card board engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! whole interaction: two columns of colored cards, a drag state machine that
//! turns raw mouse events into card moves, drop-target resolution, and
//! painting the board into the DOM. The host page only mounts a
//! [`web::BoardApp`] into an element.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Cards, columns and the in-memory board store |
//! | [`geom`] | Points, rectangles and containment |
//! | [`input`] | Mouse buttons and the drag state machine |
//! | [`hit`] | Hovered-column and insertion-index resolution |
//! | [`render`] | Scene view model and DOM painting |
//! | [`web`] | wasm entry point and scoped window listeners |
//! | [`consts`] | Shared layout constants (card size, spacing, header offset) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod web;
