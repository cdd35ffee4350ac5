use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn clamp_low_wins_when_bounds_cross() {
    assert_eq!(clamp_low_wins(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_low_wins(-5.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_low_wins(50.0, 0.0, 10.0), 10.0);
    assert_eq!(clamp_low_wins(50.0, 20.0, 10.0), 20.0);
    assert_eq!(clamp_low_wins(-50.0, 20.0, 10.0), 20.0);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 200, 100, 50, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..8], &[200, 100, 50, 255]);
}

#[test]
fn unpremultiply_restores_half_alpha_channels() {
    let mut px = vec![100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([100u8, 50, 200]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
    assert_eq!(px[3], 128);
}
