use super::*;

const AREA_W: f64 = 352.0;
const AREA_H: f64 = 264.0;

fn crop(source_w: u32, source_h: u32, zoom: f64, pan: Vec2) -> CropRect {
    resolve_crop(source_w, source_h, AREA_W, AREA_H, zoom, pan).unwrap()
}

#[test]
fn matching_aspect_covers_everything() {
    let c = crop(800, 600, 1.0, Vec2::ZERO);
    assert_eq!(c, CropRect { x: 0.0, y: 0.0, w: 800.0, h: 600.0 });
}

#[test]
fn wide_source_crops_sides() {
    let c = crop(1600, 600, 1.0, Vec2::ZERO);
    assert_eq!(c, CropRect { x: 400.0, y: 0.0, w: 800.0, h: 600.0 });
}

#[test]
fn tall_source_crops_top_and_bottom() {
    let c = crop(800, 1200, 1.0, Vec2::ZERO);
    assert_eq!(c.x, 0.0);
    assert!((c.w - 800.0).abs() < 1e-9);
    assert!((c.h - 600.0).abs() < 1e-9);
    assert!((c.y - 300.0).abs() < 1e-9);
}

#[test]
fn zoom_shrinks_the_crop_around_center() {
    let c = crop(800, 600, 1.2, Vec2::ZERO);
    assert!((c.w - 800.0 / 1.2).abs() < 1e-9);
    assert!((c.h - 600.0 / 1.2).abs() < 1e-9);
    assert!((c.x + c.w / 2.0 - 400.0).abs() < 1e-9);
    assert!((c.y + c.h / 2.0 - 300.0).abs() < 1e-9);
}

#[test]
fn zoom_below_one_keeps_the_cover_rect() {
    let base = crop(800, 600, 1.0, Vec2::ZERO);
    assert_eq!(crop(800, 600, 0.5, Vec2::ZERO), base);
    assert_eq!(crop(800, 600, 0.9, Vec2::ZERO), base);
}

#[test]
fn pan_moves_the_crop_opposite_to_the_drag() {
    // Dragging right (+x) shows pixels further left in the source.
    let centered = crop(800, 600, 1.2, Vec2::ZERO);
    let panned = crop(800, 600, 1.2, Vec2::new(10.0, 0.0));
    assert!(panned.x < centered.x);
    assert_eq!(panned.y, centered.y);
}

#[test]
fn pan_converts_at_the_cover_scale() {
    // base.w / area_w = 800 / 352; 10 screen px moves that many source px.
    let centered = crop(800, 600, 1.2, Vec2::ZERO);
    let panned = crop(800, 600, 1.2, Vec2::new(-10.0, 0.0));
    assert!((panned.x - centered.x - 10.0 * 800.0 / AREA_W).abs() < 1e-9);
}

#[test]
fn crop_stays_inside_the_source_for_any_pan() {
    let zooms = [1.0, 1.05, 1.1, 1.15, 1.2];
    let pans = [-1e6, -100.0, -30.0, 0.0, 30.0, 100.0, 1e6];
    for (sw, sh) in [(800u32, 600u32), (1600, 600), (353, 1000), (10, 10)] {
        for &z in &zooms {
            for &px in &pans {
                for &py in &pans {
                    let c = crop(sw, sh, z, Vec2::new(px, py));
                    assert!(
                        c.within(sw, sh),
                        "crop {c:?} escapes {sw}x{sh} at zoom {z} pan ({px},{py})"
                    );
                }
            }
        }
    }
}

#[test]
fn zero_dimensions_are_an_error() {
    let err = resolve_crop(0, 600, AREA_W, AREA_H, 1.0, Vec2::ZERO).unwrap_err();
    assert!(matches!(err, CardError::InvalidImageDimensions(_)));
    assert!(resolve_crop(800, 0, AREA_W, AREA_H, 1.0, Vec2::ZERO).is_err());
}

#[test]
fn nonpositive_zoom_is_an_error() {
    assert!(resolve_crop(800, 600, AREA_W, AREA_H, 0.0, Vec2::ZERO).is_err());
    assert!(resolve_crop(800, 600, AREA_W, AREA_H, f64::NAN, Vec2::ZERO).is_err());
}

#[test]
fn placement_fills_the_area_at_zoom_one_and_above() {
    let area = Rect::new(20.0, 20.0, 372.0, 284.0);
    assert_eq!(resolve_placement(area, 1.0), area);
    assert_eq!(resolve_placement(area, 1.2), area);
}

#[test]
fn placement_letterboxes_centered_below_one() {
    let area = Rect::new(0.0, 0.0, 100.0, 50.0);
    let p = resolve_placement(area, 0.5);
    assert!((p.width() - 50.0).abs() < 1e-9);
    assert!((p.height() - 25.0).abs() < 1e-9);
    assert!((p.x0 - 25.0).abs() < 1e-9);
    assert!((p.y0 - 12.5).abs() < 1e-9);
}

#[test]
fn max_pan_is_zero_at_or_below_unity_zoom() {
    assert_eq!(max_pan(1.0, AREA_W, AREA_H), Vec2::ZERO);
    assert_eq!(max_pan(0.7, AREA_W, AREA_H), Vec2::ZERO);
}

#[test]
fn max_pan_grows_with_zoom() {
    let m = max_pan(1.2, AREA_W, AREA_H);
    let slack = (1.0 - 1.0 / 1.2) / 2.0;
    assert!((m.x - AREA_W * slack).abs() < 1e-9);
    assert!((m.y - AREA_H * slack).abs() < 1e-9);
}

#[test]
fn clamp_pan_boxes_the_offset() {
    let m = max_pan(1.2, AREA_W, AREA_H);
    let clamped = clamp_pan(Vec2::new(1e9, -1e9), 1.2, AREA_W, AREA_H);
    assert_eq!(clamped, Vec2::new(m.x, -m.y));

    let inside = Vec2::new(1.0, -2.0);
    assert_eq!(clamp_pan(inside, 1.2, AREA_W, AREA_H), inside);
}
