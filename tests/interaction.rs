use egui::{pos2, vec2};
use rstest::rstest;
use tshirt_designer::id_generator::ElementId;
use tshirt_designer::state::{EditorContext, EditorState};

// Two emoji: `below` at its default spot, `above` moved to the top-left
fn session_with_two_emoji() -> (EditorContext, ElementId, ElementId) {
    let mut context = EditorContext::default();
    let below = context.add_emoji("🎵");
    let above = context.add_emoji("🔥");
    context
        .registry_mut()
        .get_mut(above)
        .unwrap()
        .set_position(pos2(10.0, 10.0));
    (context, below, above)
}

#[rstest]
#[case(vec2(15.0, -30.0))]
#[case(vec2(-250.0, 400.0))]
#[case(vec2(0.0, 0.0))]
fn test_drag_moves_by_pointer_delta(#[case] delta: egui::Vec2) {
    let (mut context, below, _) = session_with_two_emoji();
    let start = context.registry().get(below).unwrap().position();
    let grab = start + vec2(5.0, 7.0);

    assert!(context.begin_drag(grab));
    assert!(context.state().is_dragging());
    context.drag_to(grab + delta * 0.5);
    context.drag_to(grab + delta);
    context.end_drag();

    // The last move wins; positions are not clamped to the surface
    let position = context.registry().get(below).unwrap().position();
    assert!((position - (start + delta)).length() < 0.001);
    assert!(context.state().is_idle());
}

#[test]
fn test_pointer_down_selects_and_raises() {
    let (mut context, below, above) = session_with_two_emoji();
    assert_eq!(context.registry().selected_id(), Some(above));

    let center = context.registry().get(below).unwrap().rect().center();
    assert!(context.begin_drag(center));

    assert_eq!(context.registry().selected_id(), Some(below));
    assert_eq!(
        *context.state(),
        EditorState::Dragging {
            element: below,
            offset: vec2(30.0, 30.0),
        }
    );

    let raised = context.state().dragged_element();
    let order: Vec<ElementId> = context
        .registry()
        .paint_order(raised)
        .iter()
        .map(|e| e.id())
        .collect();
    assert_eq!(order, vec![above, below]);

    context.end_drag();

    // Stacking goes back to insertion order
    let raised = context.state().dragged_element();
    let order: Vec<ElementId> = context
        .registry()
        .paint_order(raised)
        .iter()
        .map(|e| e.id())
        .collect();
    assert_eq!(order, vec![below, above]);
}

#[test]
fn test_pointer_down_on_empty_space() {
    let (mut context, _, above) = session_with_two_emoji();

    assert!(!context.begin_drag(pos2(390.0, 490.0)));

    assert!(context.state().is_idle());
    assert_eq!(context.registry().selected_id(), Some(above));
}

#[test]
fn test_topmost_element_is_picked() {
    let (mut context, below, above) = session_with_two_emoji();
    let shared = context.registry().get(below).unwrap().position();
    context
        .registry_mut()
        .get_mut(above)
        .unwrap()
        .set_position(shared);

    let center = context.registry().get(below).unwrap().rect().center();
    assert!(context.begin_drag(center));
    assert_eq!(context.state().dragged_element(), Some(above));
}

#[test]
fn test_moves_while_idle_do_nothing() {
    let (mut context, below, above) = session_with_two_emoji();
    let before: Vec<_> = [below, above]
        .iter()
        .map(|id| context.registry().get(*id).unwrap().position())
        .collect();

    context.drag_to(pos2(300.0, 300.0));
    context.end_drag();

    let after: Vec<_> = [below, above]
        .iter()
        .map(|id| context.registry().get(*id).unwrap().position())
        .collect();
    assert_eq!(before, after);
    assert!(context.state().is_idle());
}

#[test]
fn test_moves_after_release_do_nothing() {
    let (mut context, below, _) = session_with_two_emoji();
    let center = context.registry().get(below).unwrap().rect().center();

    assert!(context.begin_drag(center));
    context.drag_to(center + vec2(20.0, 0.0));
    context.end_drag();
    let released_at = context.registry().get(below).unwrap().position();

    context.drag_to(center + vec2(100.0, 100.0));
    assert_eq!(context.registry().get(below).unwrap().position(), released_at);
}

#[test]
fn test_deleting_dragged_element_ends_drag() {
    let (mut context, below, _) = session_with_two_emoji();
    let center = context.registry().get(below).unwrap().rect().center();
    assert!(context.begin_drag(center));

    context.delete_selected();

    assert!(context.state().is_idle());
    assert!(!context.registry().contains(below));
    assert_eq!(context.registry().selected_id(), None);
}

#[test]
fn test_second_pointer_down_while_dragging_is_ignored() {
    let (mut context, below, above) = session_with_two_emoji();
    let center = context.registry().get(below).unwrap().rect().center();
    assert!(context.begin_drag(center));

    let other = context.registry().get(above).unwrap().rect().center();
    assert!(!context.begin_drag(other));
    assert_eq!(context.state().dragged_element(), Some(below));
}
