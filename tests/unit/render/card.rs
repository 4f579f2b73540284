use super::*;
use crate::assets::decode::PreparedImage;

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        bytes.extend_from_slice(&rgba);
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(bytes),
    }
}

fn pixel(surface: &mut CardSurface, x: u32, y: u32) -> [u8; 4] {
    let w = surface.width() as usize;
    let i = (y as usize * w + x as usize) * 4;
    let data = surface.data_mut();
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

fn baseline() -> crate::composition::model::CardLayout {
    crate::composition::model::CardLayout::baseline()
}

#[test]
fn surface_rejects_zero_and_oversized_dimensions() {
    assert!(CardSurface::new(0, 100).is_err());
    assert!(CardSurface::new(100, 0).is_err());
    assert!(CardSurface::new(70_000, 100).is_err());
    assert!(CardSurface::new(392, 384).is_ok());
}

#[test]
fn base_pass_paints_card_image_and_text_area() {
    let layout = baseline();
    let image = solid_image(8, 6, [255, 0, 0, 255]);
    let crop = CropRect { x: 0.0, y: 0.0, w: 8.0, h: 6.0 };
    let area = Rect::new(20.0, 20.0, 372.0, 284.0);

    let mut s = CardSurface::new(layout.canvas_width(), layout.canvas_height()).unwrap();
    s.draw_base(&layout, &image, crop, area).unwrap();

    // Center of the image area is source red.
    assert_eq!(pixel(&mut s, 196, 152), [255, 0, 0, 255]);
    // Text area below the image is the white card background.
    assert_eq!(pixel(&mut s, 196, 340), [255, 255, 255, 255]);
}

#[test]
fn letterboxing_exposes_the_well_background() {
    let layout = baseline();
    let image = solid_image(8, 6, [0, 0, 255, 255]);
    let crop = CropRect { x: 0.0, y: 0.0, w: 8.0, h: 6.0 };
    let area = Rect::new(20.0, 20.0, 372.0, 284.0);
    let placement = crate::geometry::crop::resolve_placement(area, 0.5);

    let mut s = CardSurface::new(layout.canvas_width(), layout.canvas_height()).unwrap();
    s.draw_base(&layout, &image, crop, placement).unwrap();

    // Just inside the image area but outside the shrunk placement.
    assert_eq!(pixel(&mut s, 40, 152), [0xf5, 0xf5, 0xf5, 255]);
    // Placement center still shows the image.
    assert_eq!(pixel(&mut s, 196, 152), [0, 0, 255, 255]);
}

#[test]
fn image_paint_rejects_mismatched_byte_length() {
    let bad = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0u8; 12]),
    };
    assert!(image_paint(&bad).is_err());
}

#[test]
fn empty_text_pass_is_a_noop() {
    let layout = baseline();
    let image = solid_image(4, 3, [10, 20, 30, 255]);
    let crop = CropRect { x: 0.0, y: 0.0, w: 4.0, h: 3.0 };
    let area = Rect::new(20.0, 20.0, 372.0, 284.0);

    let mut s = CardSurface::new(layout.canvas_width(), layout.canvas_height()).unwrap();
    s.draw_base(&layout, &image, crop, area).unwrap();
    let before = pixel(&mut s, 196, 152);
    s.draw_text(&[]).unwrap();
    assert_eq!(pixel(&mut s, 196, 152), before);
}

#[test]
fn bezpath_conversion_keeps_all_elements() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 0.0));
    p.quad_to((15.0, 5.0), (10.0, 10.0));
    p.curve_to((5.0, 12.0), (2.0, 12.0), (0.0, 10.0));
    p.close_path();
    let out = bezpath_to_cpu(&p);
    assert_eq!(out.elements().len(), p.elements().len());
}
