#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::geom::Bounds;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Press, move, and release, followed by the click the browser fires at the
/// release point; returns the release actions.
fn drag(core: &mut SurfaceCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from);
    core.on_pointer_move(to);
    let actions = core.on_pointer_up(to);
    core.on_click(to);
    actions
}

fn finalized_id(actions: &[Action]) -> Option<AnnotationId> {
    actions.iter().find_map(|a| match a {
        Action::Finalized(annotation) => Some(annotation.id),
        _ => None,
    })
}

fn assert_no_overlap(core: &SurfaceCore) {
    let done: Vec<Bounds> = core.store.finalized().map(Annotation::bounds).collect();
    for (i, a) in done.iter().enumerate() {
        for b in &done[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}

// =============================================================
// Pointer down
// =============================================================

#[test]
fn down_starts_in_progress_annotation() {
    let mut core = SurfaceCore::new();
    let actions = core.on_pointer_down(pt(10.0, 10.0));
    let Some(Action::Created { id }) = actions.first() else {
        panic!("expected Created, got {actions:?}");
    };
    assert_eq!(core.input, InputState::Drawing { id: *id });
    let a = core.in_progress().cloned().unwrap_or_else(|| Annotation::start_at(pt(-1.0, -1.0)));
    assert_eq!((a.x, a.y, a.width, a.height, a.done), (10.0, 10.0, 0.0, 0.0, false));
}

#[test]
fn down_while_drawing_is_ignored() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(10.0, 10.0));
    let actions = core.on_pointer_down(pt(300.0, 300.0));
    assert!(actions.is_empty());
    assert_eq!(core.store.len(), 1);
}

// =============================================================
// Pointer move
// =============================================================

#[test]
fn move_when_idle_is_noop() {
    let mut core = SurfaceCore::new();
    assert!(core.on_pointer_move(pt(50.0, 50.0)).is_empty());
    assert!(core.store.is_empty());
}

#[test]
fn move_sets_signed_extents_and_validity() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_move(pt(150.0, 50.0));
    let a = core.in_progress().cloned();
    assert_eq!(a.as_ref().map(|a| (a.width, a.height)), Some((140.0, 40.0)));
    assert_eq!(a.and_then(|a| a.valid), Some(true));
}

#[test]
fn move_leftward_gives_negative_extents() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(300.0, 300.0));
    core.on_pointer_move(pt(100.0, 250.0));
    let a = core.in_progress().cloned();
    assert_eq!(a.as_ref().map(|a| (a.width, a.height)), Some((-200.0, -50.0)));
    assert_eq!(a.and_then(|a| a.valid), Some(true));
}

#[test]
fn below_minimum_size_is_invalid() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_move(pt(60.0, 20.0));
    assert_eq!(core.in_progress().and_then(|a| a.valid), Some(false));
}

#[test]
fn narrow_or_short_is_invalid_regardless_of_overlap() {
    for (to, label) in [(pt(109.0, 100.0), "narrow"), (pt(300.0, 19.0), "short"), (pt(-89.0, 100.0), "narrow-left")] {
        let mut core = SurfaceCore::new();
        core.on_pointer_down(pt(10.0, 0.0));
        core.on_pointer_move(to);
        assert_eq!(core.check_in_progress(), Some(false), "{label}");
    }
}

#[test]
fn exactly_minimum_size_is_valid() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(100.0, 20.0));
    assert_eq!(core.check_in_progress(), Some(true));
}

#[test]
fn validity_is_none_when_idle() {
    assert_eq!(SurfaceCore::new().check_in_progress(), None);
}

#[test]
fn validity_recovers_when_pointer_grows_box() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(20.0, 5.0));
    assert_eq!(core.in_progress().and_then(|a| a.valid), Some(false));
    core.on_pointer_move(pt(200.0, 50.0));
    assert_eq!(core.in_progress().and_then(|a| a.valid), Some(true));
}

#[test]
fn move_leaves_finalized_annotations_untouched() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(150.0, 40.0));
    let before = core.annotations()[0].clone();
    core.on_pointer_down(pt(0.0, 200.0));
    core.on_pointer_move(pt(400.0, 400.0));
    assert_eq!(core.annotations()[0], before);
}

// =============================================================
// Pointer up
// =============================================================

#[test]
fn valid_draw_is_finalized() {
    let mut core = SurfaceCore::new();
    let actions = drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    assert!(finalized_id(&actions).is_some());
    assert_eq!(core.input, InputState::Idle);

    let views = core.snapshot();
    assert_eq!(views.len(), 1);
    let v = &views[0];
    assert_eq!((v.index, v.x, v.y, v.width, v.height, v.done), (0, 10.0, 10.0, 140.0, 40.0, true));
    assert_eq!(core.annotations()[0].valid, None);
}

#[test]
fn invalid_draw_is_discarded() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(150.0, 40.0));
    let before = core.annotations().to_vec();

    let actions = drag(&mut core, pt(10.0, 300.0), pt(60.0, 310.0));
    assert!(matches!(actions.as_slice(), [Action::Discarded { .. }]));
    assert_eq!(core.annotations(), before.as_slice());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn press_and_release_without_move_is_discarded() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_up(pt(10.0, 10.0));
    assert!(core.store.is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn up_when_idle_is_noop() {
    let mut core = SurfaceCore::new();
    assert!(core.on_pointer_up(pt(10.0, 10.0)).is_empty());
}

#[test]
fn geometry_frozen_at_release_point() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(150.0, 40.0));
    core.on_pointer_up(pt(160.0, 45.0));
    let a = &core.annotations()[0];
    assert_eq!((a.width, a.height, a.done), (160.0, 45.0, true));
}

#[test]
fn release_rechecks_validity_at_release_point() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(150.0, 40.0));
    // Pointer snapped back before release: too small now.
    let actions = core.on_pointer_up(pt(20.0, 5.0));
    assert!(matches!(actions.as_slice(), [Action::Discarded { .. }]));
    assert!(core.store.is_empty());
}

// =============================================================
// Overlap
// =============================================================

#[test]
fn overlapping_second_draw_is_refused() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));

    core.on_pointer_down(pt(100.0, 30.0));
    core.on_pointer_move(pt(300.0, 100.0));
    assert_eq!(core.in_progress().and_then(|a| a.valid), Some(false));
    let actions = core.on_pointer_up(pt(300.0, 100.0));

    assert!(matches!(actions.as_slice(), [Action::Discarded { .. }]));
    assert_eq!(core.store.finalized().count(), 1);
    assert_no_overlap(&core);
}

#[test]
fn overlap_detected_for_box_drawn_up_left() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(100.0, 100.0), pt(250.0, 150.0));

    core.on_pointer_down(pt(400.0, 300.0));
    core.on_pointer_move(pt(200.0, 120.0));
    assert_eq!(core.check_in_progress(), Some(false));
}

#[test]
fn touching_boxes_are_both_accepted() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(150.0, 40.0));
    let actions = drag(&mut core, pt(150.0, 0.0), pt(300.0, 40.0));
    assert!(finalized_id(&actions).is_some());
    assert_eq!(core.store.finalized().count(), 2);
    assert_no_overlap(&core);
}

#[test]
fn enclosing_an_existing_box_is_refused() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(100.0, 100.0), pt(250.0, 150.0));
    let actions = drag(&mut core, pt(0.0, 0.0), pt(500.0, 500.0));
    assert!(finalized_id(&actions).is_none());
    assert_eq!(core.store.len(), 1);
}

#[test]
fn finalized_boxes_never_overlap_after_many_draws() {
    let mut core = SurfaceCore::new();
    let gestures = [
        (pt(0.0, 0.0), pt(150.0, 40.0)),
        (pt(100.0, 20.0), pt(300.0, 80.0)),
        (pt(150.0, 0.0), pt(300.0, 30.0)),
        (pt(400.0, 400.0), pt(200.0, 100.0)),
        (pt(0.0, 100.0), pt(140.0, 140.0)),
        (pt(120.0, 130.0), pt(260.0, 90.0)),
        (pt(0.0, 300.0), pt(600.0, 600.0)),
    ];
    for (from, to) in gestures {
        drag(&mut core, from, to);
        assert_no_overlap(&core);
    }
    assert!(core.store.finalized().count() >= 3);
}

// =============================================================
// Pointer leave
// =============================================================

#[test]
fn leave_mid_draw_discards() {
    let mut core = SurfaceCore::new();
    core.on_pointer_down(pt(0.0, 0.0));
    core.on_pointer_move(pt(150.0, 40.0));
    let actions = core.handle(PointerEvent::Leave);
    assert!(matches!(actions.as_slice(), [Action::Discarded { .. }]));
    assert!(core.store.is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn leave_when_idle_is_noop() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(0.0, 0.0), pt(150.0, 40.0));
    assert!(core.handle(PointerEvent::Leave).is_empty());
    assert_eq!(core.store.len(), 1);
}

// =============================================================
// Click (delete)
// =============================================================

#[test]
fn click_on_remove_handle_deletes() {
    let mut core = SurfaceCore::new();
    let id = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0)));
    let actions = core.on_click(pt(14.0, 6.0));
    assert_eq!(id.map(|id| vec![Action::Deleted { id, index: 0 }]), Some(actions));
    assert!(core.store.is_empty());
}

#[test]
fn click_elsewhere_does_nothing() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    assert!(core.on_click(pt(80.0, 30.0)).is_empty());
    assert!(core.on_click(pt(150.0, 50.0)).is_empty());
    assert_eq!(core.store.len(), 1);
}

#[test]
fn delete_keeps_display_indices_contiguous() {
    let mut core = SurfaceCore::new();
    let ids: Vec<_> = (0..4)
        .filter_map(|i| {
            let y = f64::from(i) * 100.0;
            finalized_id(&drag(&mut core, pt(10.0, y + 10.0), pt(200.0, y + 60.0)))
        })
        .collect();
    assert_eq!(ids.len(), 4);

    let actions = core.on_click(pt(10.0, 110.0));
    assert_eq!(actions, vec![Action::Deleted { id: ids[1], index: 1 }]);

    let views = core.snapshot();
    let indices: Vec<_> = views.iter().map(|v| v.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    let remaining: Vec<_> = views.iter().map(|v| v.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn up_left_drag_survives_its_trailing_click() {
    let mut core = SurfaceCore::new();
    core.handle(PointerEvent::Down(pt(150.0, 50.0)));
    core.handle(PointerEvent::Move(pt(10.0, 10.0)));
    let up = core.handle(PointerEvent::Up(pt(10.0, 10.0)));
    assert!(finalized_id(&up).is_some());
    let a = &core.annotations()[0];
    assert_eq!((a.width, a.height), (-140.0, -40.0));

    // Release point is the normalized start corner, right on the remove handle.
    assert!(core.handle(PointerEvent::Click(pt(10.0, 10.0))).is_empty());
    assert_eq!(core.store.len(), 1);

    // A deliberate click afterwards still deletes.
    assert_eq!(core.handle(PointerEvent::Click(pt(10.0, 10.0))).len(), 1);
    assert!(core.store.is_empty());
}

#[test]
fn discarded_drag_also_swallows_its_click() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    // A too-small drag ending on the first box's handle.
    core.on_pointer_down(pt(40.0, 30.0));
    core.on_pointer_move(pt(10.0, 10.0));
    assert!(matches!(core.on_pointer_up(pt(10.0, 10.0)).as_slice(), [Action::Discarded { .. }]));
    assert!(core.on_click(pt(10.0, 10.0)).is_empty());
    assert_eq!(core.store.len(), 1);
}

#[test]
fn click_without_drag_on_handle_deletes() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    // Browser sequence for a plain click: down, up at the same spot, click.
    core.handle(PointerEvent::Down(pt(12.0, 8.0)));
    core.handle(PointerEvent::Up(pt(12.0, 8.0)));
    let actions = core.handle(PointerEvent::Click(pt(12.0, 8.0)));
    assert!(matches!(actions.as_slice(), [Action::Deleted { index: 0, .. }]));
    assert!(core.store.is_empty());
}

#[test]
fn delete_uses_normalized_start_corner() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(300.0, 200.0), pt(100.0, 100.0));
    assert!(core.on_click(pt(300.0, 200.0)).is_empty());
    assert_eq!(core.on_click(pt(100.0, 100.0)).len(), 1);
}

// =============================================================
// Double click (label)
// =============================================================

#[test]
fn double_click_inside_requests_label() {
    let mut core = SurfaceCore::new();
    let id = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0)));
    let actions = core.on_double_click(pt(80.0, 30.0));
    assert_eq!(id.map(|id| vec![Action::LabelRequested { id, current: String::new() }]), Some(actions));
}

#[test]
fn double_click_outside_does_nothing() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    assert!(core.on_double_click(pt(151.0, 30.0)).is_empty());
}

#[test]
fn label_changes_only_text() {
    let mut core = SurfaceCore::new();
    let Some(id) = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0))) else {
        panic!("draw should finalize");
    };
    let before = core.annotations()[0].clone();

    let actions = core.set_label(&id, Some("person".into()));
    assert_eq!(actions, vec![Action::LabelChanged { id, text: "person".into() }]);

    let after = &core.annotations()[0];
    assert_eq!(after.text, "person");
    assert_eq!(
        (after.id, after.x, after.y, after.width, after.height, after.done),
        (before.id, before.x, before.y, before.width, before.height, before.done)
    );
}

#[test]
fn relabel_reports_current_text() {
    let mut core = SurfaceCore::new();
    let Some(id) = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0))) else {
        panic!("draw should finalize");
    };
    core.set_label(&id, Some("cat".into()));
    let actions = core.handle(PointerEvent::DoubleClick(pt(20.0, 20.0)));
    assert_eq!(actions, vec![Action::LabelRequested { id, current: "cat".into() }]);
}

#[test]
fn cancelled_prompt_clears_label() {
    let mut core = SurfaceCore::new();
    let Some(id) = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0))) else {
        panic!("draw should finalize");
    };
    core.set_label(&id, Some("cat".into()));
    core.set_label(&id, None);
    assert_eq!(core.annotation(&id).map(|a| a.text.as_str()), Some(""));
}

#[test]
fn label_for_deleted_annotation_is_ignored() {
    let mut core = SurfaceCore::new();
    let Some(id) = finalized_id(&drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0))) else {
        panic!("draw should finalize");
    };
    core.on_click(pt(10.0, 10.0));
    assert!(core.set_label(&id, Some("late".into())).is_empty());
    assert!(core.set_label(&Uuid::new_v4(), Some("x".into())).is_empty());
}

// =============================================================
// Dispatch and housekeeping
// =============================================================

#[test]
fn handle_dispatches_full_gesture() {
    let mut core = SurfaceCore::new();
    core.handle(PointerEvent::Down(pt(10.0, 10.0)));
    core.handle(PointerEvent::Move(pt(150.0, 50.0)));
    let actions = core.handle(PointerEvent::Up(pt(150.0, 50.0)));
    assert!(finalized_id(&actions).is_some());
    // The click the browser fires after mouseup is swallowed.
    assert!(core.handle(PointerEvent::Click(pt(150.0, 50.0))).is_empty());
    assert_eq!(core.store.len(), 1);
}

#[test]
fn clear_resets_everything() {
    let mut core = SurfaceCore::new();
    drag(&mut core, pt(10.0, 10.0), pt(150.0, 50.0));
    core.on_pointer_down(pt(0.0, 300.0));
    core.clear();
    assert!(core.store.is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn custom_thresholds_apply() {
    let config = SurfaceConfig { min_width: 10.0, min_height: 10.0, ..Default::default() };
    let mut core = SurfaceCore::with_config(config);
    let actions = drag(&mut core, pt(0.0, 0.0), pt(20.0, 15.0));
    assert!(finalized_id(&actions).is_some());
}
