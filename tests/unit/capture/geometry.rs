use super::*;

#[test]
fn wider_video_crops_horizontally() {
    let c = cover_crop(Size::new(1920.0, 1080.0), Size::new(400.0, 300.0));
    assert_eq!(c.sw, 1440.0);
    assert_eq!(c.sx, 240.0);
    assert_eq!(c.sy, 0.0);
    assert_eq!(c.sh, 1080.0);
}

#[test]
fn narrower_video_crops_vertically() {
    let c = cover_crop(Size::new(1080.0, 1920.0), Size::new(400.0, 300.0));
    assert_eq!(c.sw, 1080.0);
    assert_eq!(c.sh, 810.0);
    assert_eq!(c.sy, 555.0);
}

#[test]
fn matching_aspect_uses_full_frame() {
    let c = cover_crop(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
    assert_eq!(c.to_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn degenerate_sizes_do_not_crop() {
    let c = cover_crop(Size::ZERO, Size::new(400.0, 300.0));
    assert_eq!(c.to_rect(), Rect::ZERO);
}

#[test]
fn scale_factor_respects_minimum_resolution() {
    let p = CapturePolicy::default();
    let s = p.scale_factor(ScreenRect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
    assert_eq!(s, 4.8);
    let f = p.frame_for(ScreenRect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
    assert_eq!(f.canvas, Canvas { width: 1920, height: 1440 });

    let hi_dpi = CapturePolicy {
        device_pixel_ratio: 3.0,
        ..CapturePolicy::default()
    };
    assert_eq!(hi_dpi.scale_factor(ScreenRect::new(0.0, 0.0, 1000.0, 1000.0)).unwrap(), 6.0);
}

#[test]
fn empty_video_rect_is_rejected() {
    let p = CapturePolicy::default();
    assert!(p.scale_factor(ScreenRect::new(0.0, 0.0, 0.0, 300.0)).is_err());
}

#[test]
fn policy_validation() {
    assert!(CapturePolicy::default().validate().is_ok());
    let bad = CapturePolicy {
        min_width: f64::NAN,
        ..CapturePolicy::default()
    };
    assert!(bad.validate().is_err());
    let zero = CapturePolicy {
        device_pixel_ratio: 0.0,
        dpr_multiplier: 2.0,
        min_width: 0.0,
        min_height: 0.0,
    };
    assert!(zero.validate().is_err());
}

#[test]
fn contain_fit_centers_on_short_axis() {
    let r = contain_fit(Size::new(100.0, 200.0), ScreenRect::new(10.0, 20.0, 200.0, 200.0));
    assert_eq!(r, ScreenRect::new(60.0, 20.0, 100.0, 200.0));
}

#[test]
fn raster_mapping_is_relative_to_video_origin() {
    let g = ScreenGeometry {
        video: ScreenRect::new(10.0, 20.0, 400.0, 300.0),
        ..ScreenGeometry::default()
    };
    let r = g.to_raster(ScreenRect::new(110.0, 70.0, 50.0, 10.0), 2.0);
    assert_eq!(r, Rect::new(200.0, 100.0, 300.0, 120.0));
}
