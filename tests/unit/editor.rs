use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([120, 80, 40, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut buf),
            image::ImageFormat::Png,
        )
        .unwrap();
    buf
}

#[test]
fn title_rejected_beyond_limit_keeps_previous() {
    let mut e = Editor::new();
    e.set_title("Beach day").unwrap();

    let long: String = "x".repeat(TITLE_MAX_CHARS + 1);
    assert!(e.set_title(&long).is_err());
    assert_eq!(e.card().title, "Beach day");

    let exactly: String = "y".repeat(TITLE_MAX_CHARS);
    assert!(e.set_title(&exactly).is_ok());
}

#[test]
fn zoom_steps_clamp_at_the_bounds() {
    let mut e = Editor::new();
    for _ in 0..10 {
        e.zoom_in();
    }
    assert!((e.card().zoom - ZOOM_MAX).abs() < 1e-9);

    for _ in 0..20 {
        e.zoom_out();
    }
    assert!((e.card().zoom - ZOOM_MIN).abs() < 1e-9);
}

#[test]
fn wheel_zoom_uses_the_finer_step() {
    let mut e = Editor::new();
    e.wheel_zoom(true);
    assert!((e.card().zoom - (1.0 + ZOOM_STEP_WHEEL)).abs() < 1e-9);
    e.wheel_zoom(false);
    assert!((e.card().zoom - 1.0).abs() < 1e-9);
}

#[test]
fn pan_is_zeroed_when_zoom_returns_to_unity() {
    let mut e = Editor::new();
    e.set_zoom(1.2);
    e.set_pan(Vec2::new(5.0, -5.0));
    assert_ne!(e.card().pan, Vec2::ZERO);

    e.set_zoom(1.0);
    assert_eq!(e.card().pan, Vec2::ZERO);
}

#[test]
fn pan_reclamps_when_zoom_shrinks() {
    let mut e = Editor::new();
    e.set_zoom(1.2);
    e.set_pan(Vec2::new(1e9, 1e9));
    let at_max = e.card().pan;
    assert!(at_max.x > 0.0 && at_max.y > 0.0);

    e.set_zoom(1.1);
    assert!(e.card().pan.x < at_max.x);
    assert!(e.card().pan.y < at_max.y);
}

#[test]
fn pan_ignored_without_zoom() {
    let mut e = Editor::new();
    e.set_pan(Vec2::new(30.0, 30.0));
    assert_eq!(e.card().pan, Vec2::ZERO);
}

#[test]
fn date_parses_iso_and_rejects_garbage() {
    let mut e = Editor::new();
    e.set_date_str("2024-07-04").unwrap();
    assert_eq!(
        e.card().date,
        NaiveDate::from_ymd_opt(2024, 7, 4)
    );

    assert!(e.set_date_str("July 4").is_err());
    assert_eq!(e.card().date, NaiveDate::from_ymd_opt(2024, 7, 4));

    e.set_date_str("").unwrap();
    assert_eq!(e.card().date, None);
}

#[test]
fn font_size_clamps_to_range() {
    let mut e = Editor::new();
    e.set_font_size_px(100.0);
    assert_eq!(e.card().font_size_px, FONT_SIZE_MAX);
    e.set_font_size_px(1.0);
    assert_eq!(e.card().font_size_px, FONT_SIZE_MIN);
    e.set_font_size_px(f32::NAN);
    assert_eq!(e.card().font_size_px, FONT_SIZE_MIN);
}

#[test]
fn text_color_rejects_malformed_hex() {
    let mut e = Editor::new();
    e.set_text_color_hex("#e74c3c").unwrap();
    assert!(e.set_text_color_hex("red").is_err());
    assert_eq!(e.card().text_color, crate::foundation::core::Rgba8::opaque(0xe7, 0x4c, 0x3c));
}

#[test]
fn load_image_failure_keeps_previous_image() {
    let mut e = Editor::new();
    e.load_image(&png_bytes(4, 3)).unwrap();
    assert!(e.image().is_some());

    assert!(e.load_image(&[1, 2, 3]).is_err());
    let img = e.image().unwrap();
    assert_eq!((img.width, img.height), (4, 3));
}

#[test]
fn export_without_image_is_a_silent_noop() {
    let mut e = Editor::new();
    let out = e
        .export(&CardLayout::baseline(), &FontLibrary::new())
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn reset_restores_defaults_but_keeps_image() {
    let mut e = Editor::new();
    e.load_image(&png_bytes(4, 3)).unwrap();
    e.set_title("Trip").unwrap();
    e.set_zoom(1.2);
    e.set_filter(FilterKey::Vivid);

    e.reset();
    assert_eq!(*e.card(), Card::default());
    assert!(e.image().is_some());
}
