use super::*;

#[test]
fn touch_event_deserializes_with_defaults() {
    let ev: PointerEvent = serde_json::from_str(
        r#"{"source":"touch","points":[{"id":3,"x":1.5,"y":2.0}]}"#,
    )
    .unwrap();
    assert_eq!(ev.source, PointerSource::Touch);
    assert!(!ev.on_sprite);
    assert_eq!(ev.primary().map(|p| p.id), Some(3));
    assert_eq!(ev.positions(), vec![Point::new(1.5, 2.0)]);
}

#[test]
fn mouse_constructor_has_single_point() {
    let ev = PointerEvent::mouse(10.0, 20.0, true);
    assert_eq!(ev.points.len(), 1);
    assert!(ev.on_sprite);
}
