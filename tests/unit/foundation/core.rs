use super::*;

#[test]
fn screen_rect_edges_and_center() {
    let r = ScreenRect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
    assert_eq!(ScreenRect::from_rect(r.to_rect()), r);
}

#[test]
fn screen_rect_empty_detection() {
    assert!(ScreenRect::new(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(ScreenRect::new(0.0, 0.0, 10.0, -1.0).is_empty());
    assert!(ScreenRect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
    assert!(!ScreenRect::new(0.0, 0.0, 1.0, 1.0).is_empty());
}

#[test]
fn rgba8_premultiplied_matches_css_alpha() {
    let c = Rgba8::new(0, 0, 0, 179);
    assert_eq!(c.premultiplied(), [0, 0, 0, 179]);
    assert_eq!(Rgba8::WHITE.premultiplied(), [255, 255, 255, 255]);
    assert_eq!(Rgba8::new(255, 255, 255, 128).premultiplied(), [128, 128, 128, 128]);
}

#[test]
fn canvas_byte_len() {
    assert_eq!(
        Canvas {
            width: 3,
            height: 2
        }
        .byte_len(),
        24
    );
}
