use super::*;

#[test]
fn scaled_viewport_maps_to_logical_units() {
    let size = CanvasSize::default();
    let vp = Viewport {
        left: 100.0,
        top: 20.0,
        rendered_width: 250.0,
        rendered_height: 250.0,
    };
    let p = vp.to_logical(size, Point::new(150.0, 70.0));
    assert_eq!(p, Point::new(100.0, 100.0));
}

#[test]
fn unscaled_viewport_is_identity() {
    let size = CanvasSize::default();
    let vp = Viewport::unscaled(size);
    assert_eq!(vp.to_logical(size, Point::new(42.5, 7.0)), Point::new(42.5, 7.0));
}

#[test]
fn degenerate_rendered_size_falls_back_to_unit_scale() {
    let size = CanvasSize::default();
    let vp = Viewport {
        left: 0.0,
        top: 0.0,
        rendered_width: 0.0,
        rendered_height: f64::NAN,
    };
    assert_eq!(vp.to_logical(size, Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
}

#[test]
fn leave_is_folded_into_up() {
    assert_eq!(PointerEvent::Leave { x: 1.0, y: 2.0 }.phase(), Phase::Up);
    assert_eq!(PointerEvent::Down { x: 1.0, y: 2.0 }.phase(), Phase::Down);
    let ev: PointerEvent = serde_json::from_str(r#"{"phase":"move","x":3,"y":4}"#).unwrap();
    assert_eq!(ev.position(), Point::new(3.0, 4.0));
}
