#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{CARD_HEIGHT_PX, CARD_PITCH_PX, CARD_WIDTH_PX, COLUMN_HEADER_PX};
use crate::doc::Card;

// =============================================================
// Helpers
// =============================================================

const COL_A_LEFT: f64 = 80.0;
const COL_B_LEFT: f64 = 420.0;
const COL_TOP: f64 = 40.0;

fn make_core() -> EngineCore {
    let a = (1..=4).map(|id| Card::new(id, "red")).collect();
    let b = (5..=8).map(|id| Card::new(id, "blue")).collect();
    let mut core = EngineCore::new(Board::from_columns(a, b).unwrap());
    core.set_column_bounds(ColumnId::A, Some(Rect::from_origin_size(COL_A_LEFT, COL_TOP, 300.0, 800.0)));
    core.set_column_bounds(ColumnId::B, Some(Rect::from_origin_size(COL_B_LEFT, COL_TOP, 300.0, 800.0)));
    core
}

fn ids(core: &EngineCore, column: ColumnId) -> Vec<CardId> {
    core.board().column(column).iter().map(|c| c.id).collect()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// On-screen rect of the card at `index` in `column`, as laid out at rest.
fn card_rect(column: ColumnId, index: usize) -> Rect {
    let left = match column {
        ColumnId::A => COL_A_LEFT,
        ColumnId::B => COL_B_LEFT,
    } + 50.0;
    #[allow(clippy::cast_precision_loss)]
    let top = COL_TOP + COLUMN_HEADER_PX + index as f64 * CARD_PITCH_PX;
    Rect::from_origin_size(left, top, CARD_WIDTH_PX, CARD_HEIGHT_PX)
}

/// A point inside the upper part of the card at `index` in `column`.
fn on_card(column: ColumnId, index: usize) -> Point {
    let r = card_rect(column, index);
    pt(r.left + 20.0, r.top + 15.0)
}

fn pick_up(core: &mut EngineCore, column: ColumnId, index: usize) -> Vec<Action> {
    let id = core.board().column(column)[index].id;
    core.on_pointer_down(id, card_rect(column, index), on_card(column, index), Button::Primary)
}

fn ended(actions: &[Action]) -> Option<DropOutcome> {
    actions.iter().find_map(|a| match a {
        Action::DragEnded { outcome, .. } => Some(*outcome),
        _ => None,
    })
}

fn has_render_needed(actions: &[Action]) -> bool {
    actions.contains(&Action::RenderNeeded)
}

fn assert_invariant(core: &EngineCore) {
    assert!(core.board().validate().is_ok(), "id-set invariant broken: {:?}", core.board().snapshot());
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_starts_idle() {
    let core = make_core();
    assert!(!core.is_dragging());
    assert!(core.session().is_none());
    assert!(core.drop_target().is_none());
}

#[test]
fn with_seed_is_deterministic() {
    let a = EngineCore::with_seed(42);
    let b = EngineCore::with_seed(42);
    assert_eq!(a.board().column(ColumnId::A), b.board().column(ColumnId::A));
    assert_eq!(a.board().snapshot().a, vec![1, 2, 3, 4]);
    assert_eq!(a.board().snapshot().b, vec![5, 6, 7, 8]);
}

// =============================================================
// Pointer down
// =============================================================

#[test]
fn pointer_down_starts_drag_and_records_offset() {
    let mut core = make_core();
    let actions = pick_up(&mut core, ColumnId::A, 1);

    assert!(core.is_dragging());
    assert!(actions.contains(&Action::DragStarted { card: 2 }));
    assert!(actions.contains(&Action::PreventDefault));
    assert!(has_render_needed(&actions));

    let session = core.session().unwrap();
    assert_eq!(session.card, 2);
    assert_eq!(session.origin, ColumnId::A);
    assert_eq!(session.offset, pt(20.0, 15.0));
    assert_eq!(session.pointer, on_card(ColumnId::A, 1));
}

#[test]
fn pointer_down_resolves_initial_target() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 1);
    assert_eq!(core.drop_target(), Some(DropTarget { column: ColumnId::A, index: 1 }));
}

#[test]
fn pointer_down_with_secondary_button_is_ignored() {
    let mut core = make_core();
    let actions = core.on_pointer_down(1, card_rect(ColumnId::A, 0), on_card(ColumnId::A, 0), Button::Secondary);
    assert!(actions.is_empty());
    assert!(!core.is_dragging());
}

#[test]
fn pointer_down_on_unknown_card_is_ignored() {
    let mut core = make_core();
    let actions = core.on_pointer_down(99, card_rect(ColumnId::A, 0), on_card(ColumnId::A, 0), Button::Primary);
    assert!(actions.is_empty());
    assert!(!core.is_dragging());
}

#[test]
fn pointer_down_with_degenerate_card_rect_uses_zero_offset() {
    let mut core = make_core();
    core.on_pointer_down(1, Rect::new(0.0, 0.0, 0.0, 0.0), pt(150.0, 150.0), Button::Primary);
    assert_eq!(core.session().unwrap().offset, Point::default());
}

#[test]
fn pointer_down_while_dragging_cancels_stale_drag() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.on_pointer_move(pt(600.0, 500.0));

    let actions = pick_up(&mut core, ColumnId::B, 2);
    assert_eq!(actions[0], Action::DragEnded { card: 1, outcome: DropOutcome::Cancelled });
    assert!(actions.contains(&Action::DragStarted { card: 7 }));
    assert_eq!(core.session().unwrap().card, 7);
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
}

// =============================================================
// Pointer move
// =============================================================

#[test]
fn pointer_move_while_idle_is_noop() {
    let mut core = make_core();
    assert!(core.on_pointer_move(pt(200.0, 200.0)).is_empty());
    assert!(!core.is_dragging());
}

#[test]
fn pointer_move_tracks_pointer_and_target() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);

    let to = on_card(ColumnId::B, 2);
    let actions = core.on_pointer_move(to);
    assert_eq!(core.session().unwrap().pointer, to);
    assert!(actions.contains(&Action::DropTargetChanged(Some(DropTarget { column: ColumnId::B, index: 2 }))));
    assert!(has_render_needed(&actions));
}

#[test]
fn pointer_move_within_same_target_only_renders() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    let p = on_card(ColumnId::A, 0);
    let actions = core.on_pointer_move(pt(p.x + 3.0, p.y + 2.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
}

#[test]
fn pointer_move_outside_columns_clears_target() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    let actions = core.on_pointer_move(pt(400.0, 300.0));
    assert!(actions.contains(&Action::DropTargetChanged(None)));
    assert!(core.drop_target().is_none());
    assert!(core.is_dragging());
}

#[test]
fn pointer_move_over_unmeasured_column_has_no_target() {
    let mut core = make_core();
    core.set_column_bounds(ColumnId::B, None);
    pick_up(&mut core, ColumnId::A, 0);
    core.on_pointer_move(on_card(ColumnId::B, 1));
    assert!(core.drop_target().is_none());
}

#[test]
fn pointer_move_does_not_mutate_columns() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.on_pointer_move(on_card(ColumnId::B, 3));
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8]);
}

// =============================================================
// Pointer up
// =============================================================

#[test]
fn pointer_up_while_idle_is_noop() {
    let mut core = make_core();
    assert!(core.on_pointer_up(pt(200.0, 200.0)).is_empty());
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
}

#[test]
fn release_at_origin_leaves_order_unchanged() {
    for index in 0..4 {
        let mut core = make_core();
        pick_up(&mut core, ColumnId::A, index);
        let actions = core.on_pointer_up(on_card(ColumnId::A, index));
        assert_eq!(ended(&actions), Some(DropOutcome::Unchanged), "index {index}");
        assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
        assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8]);
        assert!(!core.is_dragging());
    }
}

#[test]
fn release_in_lower_half_of_own_slot_is_unchanged() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 1);
    let r = card_rect(ColumnId::A, 1);
    core.on_pointer_up(pt(r.left + 10.0, r.top + 140.0));
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
}

#[test]
fn cross_column_drop_on_empty_region_appends() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 1);
    let actions = core.on_pointer_up(pt(COL_B_LEFT + 150.0, COL_TOP + 790.0));

    assert_eq!(ids(&core, ColumnId::A), vec![1, 3, 4]);
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8, 2]);
    assert_eq!(
        ended(&actions),
        Some(DropOutcome::Moved { from: ColumnId::A, to: ColumnId::B, index: 4 })
    );
    assert!(has_render_needed(&actions));
    assert_invariant(&core);
}

#[test]
fn cross_column_drop_inserts_at_index() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::B, 3);
    core.on_pointer_up(on_card(ColumnId::A, 1));
    assert_eq!(ids(&core, ColumnId::A), vec![1, 8, 2, 3, 4]);
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7]);
    assert_invariant(&core);
}

#[test]
fn cross_column_drop_in_header_goes_first() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 3);
    core.on_pointer_up(pt(COL_B_LEFT + 150.0, COL_TOP + 10.0));
    assert_eq!(ids(&core, ColumnId::B), vec![4, 5, 6, 7, 8]);
}

#[test]
fn reorder_card_one_to_index_three() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    // Upper half of slot 3 resolves to insertion index 3.
    let target = on_card(ColumnId::A, 3);
    core.on_pointer_move(target);
    assert_eq!(core.drop_target(), Some(DropTarget { column: ColumnId::A, index: 3 }));

    let actions = core.on_pointer_up(target);
    assert_eq!(ids(&core, ColumnId::A), vec![2, 3, 1, 4]);
    assert_eq!(ended(&actions), Some(DropOutcome::Reordered { column: ColumnId::A, from: 0, to: 2 }));
    assert_invariant(&core);
}

#[test]
fn reorder_to_end_of_own_column() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.on_pointer_up(pt(COL_A_LEFT + 150.0, COL_TOP + 790.0));
    assert_eq!(ids(&core, ColumnId::A), vec![2, 3, 4, 1]);
}

#[test]
fn reorder_upwards() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::B, 3);
    core.on_pointer_up(on_card(ColumnId::B, 0));
    assert_eq!(ids(&core, ColumnId::B), vec![8, 5, 6, 7]);
}

#[test]
fn release_outside_both_columns_cancels() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 2);
    core.on_pointer_move(on_card(ColumnId::B, 0));
    let actions = core.on_pointer_up(pt(2000.0, 2000.0));

    assert_eq!(ended(&actions), Some(DropOutcome::Cancelled));
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8]);
    assert!(!core.is_dragging());
    assert!(core.session().is_none());
}

#[test]
fn release_uses_final_pointer_not_last_move() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.on_pointer_move(pt(2000.0, 2000.0));
    core.on_pointer_up(pt(COL_B_LEFT + 150.0, COL_TOP + 790.0));
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8, 1]);
}

#[test]
fn release_with_no_measured_columns_cancels() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.set_column_bounds(ColumnId::A, None);
    core.set_column_bounds(ColumnId::B, Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    let actions = core.on_pointer_up(on_card(ColumnId::B, 0));
    assert_eq!(ended(&actions), Some(DropOutcome::Cancelled));
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
}

#[test]
fn drop_resets_card_offsets() {
    let mut a = vec![Card::new(1, "red")];
    a[0].x = 5.0;
    a[0].y = 6.0;
    let mut core = EngineCore::new(Board::from_columns(a, Vec::new()).unwrap());
    core.set_column_bounds(ColumnId::A, Some(Rect::from_origin_size(COL_A_LEFT, COL_TOP, 300.0, 800.0)));
    core.on_pointer_down(1, card_rect(ColumnId::A, 0), on_card(ColumnId::A, 0), Button::Primary);
    core.on_pointer_up(pt(5000.0, 5000.0));
    let card = core.board().card(1).unwrap();
    assert_eq!((card.x, card.y), (0.0, 0.0));
}

// =============================================================
// Cancel
// =============================================================

#[test]
fn cancel_while_idle_is_noop() {
    let mut core = make_core();
    assert!(core.cancel().is_empty());
}

#[test]
fn cancel_returns_to_idle_without_moving() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 1);
    core.on_pointer_move(on_card(ColumnId::B, 1));
    let actions = core.cancel();
    assert_eq!(actions, vec![Action::DragEnded { card: 2, outcome: DropOutcome::Cancelled }, Action::RenderNeeded]);
    assert!(!core.is_dragging());
    assert_eq!(ids(&core, ColumnId::A), vec![1, 2, 3, 4]);
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8]);
}

#[test]
fn pointer_up_after_cancel_is_noop() {
    let mut core = make_core();
    pick_up(&mut core, ColumnId::A, 0);
    core.cancel();
    assert!(core.on_pointer_up(on_card(ColumnId::B, 0)).is_empty());
    assert_eq!(ids(&core, ColumnId::B), vec![5, 6, 7, 8]);
}

// =============================================================
// Invariant under arbitrary gestures
// =============================================================

#[test]
fn invariant_holds_across_gesture_sequence() {
    let mut core = make_core();
    let releases = [
        pt(COL_B_LEFT + 150.0, COL_TOP + 790.0),
        pt(COL_A_LEFT + 150.0, COL_TOP + 10.0),
        pt(2000.0, 2000.0),
        on_card(ColumnId::B, 2),
        on_card(ColumnId::A, 1),
        pt(COL_A_LEFT + 150.0, COL_TOP + 790.0),
    ];
    for (step, release) in releases.iter().cycle().take(30).enumerate() {
        let column = if step % 2 == 0 { ColumnId::A } else { ColumnId::B };
        let len = core.board().len(column);
        if len == 0 {
            continue;
        }
        pick_up(&mut core, column, step % len);
        core.on_pointer_move(pt(release.x - 7.0, release.y + 3.0));
        assert_invariant(&core);
        core.on_pointer_up(*release);
        assert_invariant(&core);
        assert!(!core.is_dragging());
    }
    assert_eq!(core.board().len(ColumnId::A) + core.board().len(ColumnId::B), 8);
}
