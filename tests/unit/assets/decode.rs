use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn buffer_length_is_checked() {
    let err = PreparedImage::from_premul_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("decode error"));
    assert!(PreparedImage::from_straight_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn solid_image_is_premultiplied() {
    let img = PreparedImage::solid(2, 1, Rgba8::new(255, 0, 0, 128));
    assert_eq!(img.rgba8_premul.as_slice(), &[128, 0, 0, 128, 128, 0, 0, 128]);
    assert_eq!(img.size(), Size::new(2.0, 1.0));
    assert!(!img.is_empty());
    assert!(PreparedImage::solid(0, 3, Rgba8::WHITE).is_empty());
}

#[test]
fn load_image_reports_missing_file() {
    let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
    assert!(err.to_string().contains("not/here.png"));
}
