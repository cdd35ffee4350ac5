use super::*;
use crate::{
    AnchorMode,
    capture::geometry::CapturePolicy,
    foundation::core::Rgba8,
    render::{raster::CaptureKind, target::MemoryTarget},
};

fn session() -> PhotoSession<MemoryTarget> {
    let config = SessionConfig {
        capture: CapturePolicy {
            device_pixel_ratio: 1.0,
            dpr_multiplier: 1.0,
            min_width: 0.0,
            min_height: 0.0,
        },
        ..SessionConfig::default()
    };
    let vp = Viewport::new(40.0, 30.0);
    PhotoSession::new(config, vp, MemoryTarget::new(MemoryTarget::DEFAULT_BOX, vp)).unwrap()
}

fn geometry() -> ScreenGeometry {
    ScreenGeometry {
        video: ScreenRect::new(0.0, 0.0, 40.0, 30.0),
        ..ScreenGeometry::default()
    }
}

#[test]
fn capture_requires_shown_sprite() {
    let mut s = session();
    let frame = PreparedImage::solid(4, 3, Rgba8::WHITE);
    let images = LayerImages {
        video_frame: Some(&frame),
        ..LayerImages::default()
    };
    assert!(s.capture_photo(geometry(), images).is_err());
    s.complete_entry();
    let base = s.capture_photo(geometry(), images).unwrap();
    assert_eq!(base.kind, CaptureKind::Base);
    assert!(s.base().is_some());
}

#[test]
fn capture_allowed_while_entry_runs() {
    let mut s = session();
    let frame = PreparedImage::solid(4, 3, Rgba8::WHITE);
    let images = LayerImages {
        video_frame: Some(&frame),
        ..LayerImages::default()
    };
    s.show_sprite();
    assert_eq!(s.transform().anchor_mode, crate::gesture::state::AnchorMode::Corner);
    assert!(s.gestures().target().is_visible());
    assert!(s.capture_photo(geometry(), images).is_ok());
}

#[test]
fn compose_final_without_base_is_an_error() {
    let s = session();
    assert!(s.compose_final(None, ScreenRect::default()).is_err());
    assert!(s.request_final(ScreenRect::default(), Instant::now()).is_err());
}

#[test]
fn final_request_waits_then_falls_back() {
    let mut s = session();
    s.complete_entry();
    let frame = PreparedImage::solid(4, 3, Rgba8::WHITE);
    s.capture_photo(
        geometry(),
        LayerImages {
            video_frame: Some(&frame),
            ..LayerImages::default()
        },
    )
    .unwrap();

    let t0 = Instant::now();
    let req = s
        .request_final(ScreenRect::new(0.0, 0.0, 10.0, 10.0), t0)
        .unwrap();
    assert_eq!(req.deadline(), t0 + Duration::from_millis(500));
    assert!(req.poll(&ImageSlot::Pending, t0).is_pending());

    let Poll::Ready(out) = req.poll(&ImageSlot::Pending, t0 + Duration::from_millis(500)) else {
        panic!("deadline passed, expected fallback");
    };
    assert_eq!(out.kind, CaptureKind::Base);

    let bubble = PreparedImage::solid(2, 2, Rgba8::new(0, 0, 255, 255));
    let Poll::Ready(out) = req.poll(&ImageSlot::Ready(bubble), t0) else {
        panic!("ready bubble should resolve");
    };
    assert_eq!(out.kind, CaptureKind::Final);
    assert_eq!(out.raster.pixel(5, 5), Some([0, 0, 255, 255]));

    let Poll::Ready(out) = req.poll(&ImageSlot::Failed("corrupt".into()), t0) else {
        panic!("failed bubble should resolve");
    };
    assert_eq!(&out, s.base().unwrap());
}

#[test]
fn retake_drops_base_and_resets_transform() {
    let mut s = session();
    s.complete_entry();
    s.on_wheel(&WheelEvent {
        delta_y: -1.0,
        on_sprite: true,
    });
    let frame = PreparedImage::solid(4, 3, Rgba8::WHITE);
    s.capture_photo(
        geometry(),
        LayerImages {
            video_frame: Some(&frame),
            ..LayerImages::default()
        },
    )
    .unwrap();
    s.retake();
    assert!(s.base().is_none());
    assert_eq!(s.transform().scale, 1.0);
    assert_eq!(s.transform().anchor_mode, AnchorMode::Centered);
}

#[test]
fn unreadable_label_font_is_not_fatal() {
    let mut config = SessionConfig::default();
    config.label.text = "Jeju".into();
    config.label.font_path = Some("/no/such/font.ttf".into());
    let vp = Viewport::new(100.0, 100.0);
    assert!(PhotoSession::new(config, vp, MemoryTarget::new(MemoryTarget::DEFAULT_BOX, vp)).is_ok());
}
