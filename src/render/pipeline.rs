//! Export orchestration: card state in, finished PNG out.
//!
//! An export walks a fixed sequence of phases. Geometry is resolved first so
//! a bad zoom/pan combination fails before any pixels are touched, the filter
//! runs over the flattened base (background and image alike, matching the
//! preview where the filter applies to the whole framed photo), and text is
//! drawn last so glyphs stay unfiltered.

use crate::{
    assets::decode::{PreparedImage, premultiply_rgba8_in_place},
    assets::fonts::{FontLibrary, TextBrushRgba8, TextLayoutEngine},
    composition::model::{Card, CardLayout, TextStyle, format_display_date},
    encode::png::unpremultiply_rgba8_in_place,
    filters::engine::apply_filter,
    filters::spec::FilterKey,
    foundation::core::{Point, Rect, Rgba8},
    foundation::error::CardResult,
    geometry::crop::{resolve_crop, resolve_placement},
    render::card::{CardSurface, TextLine},
};

/// Phases an export passes through, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Resolving,
    Drawing,
    Filtering,
    TextOverlay,
    Encoded,
}

/// Finished export: encoded bytes plus the download file name.
#[derive(Clone, Debug)]
pub struct ExportedCard {
    pub png_bytes: Vec<u8>,
    pub file_name: String,
}

/// Render one card to a PNG.
///
/// The card must already be valid; validation errors surface before any
/// surface is allocated.
#[tracing::instrument(skip_all, fields(filter = %card.filter, zoom = card.zoom, hq = layout.hq))]
pub fn export_card(
    card: &Card,
    image: &PreparedImage,
    layout: &CardLayout,
    fonts: &FontLibrary,
) -> CardResult<ExportedCard> {
    card.validate()?;

    tracing::debug!(phase = ?ExportPhase::Resolving, "resolving geometry");
    let pan = crate::foundation::core::Vec2::new(
        card.pan.x * layout.font_scale() as f64,
        card.pan.y * layout.font_scale() as f64,
    );
    let crop = resolve_crop(
        image.width,
        image.height,
        layout.image_area_w,
        layout.image_area_h,
        card.zoom,
        pan,
    )?;
    let area = Rect::new(
        layout.padding,
        layout.padding,
        layout.padding + layout.image_area_w,
        layout.padding + layout.image_area_h,
    );
    let placement = resolve_placement(area, card.zoom);

    tracing::debug!(phase = ?ExportPhase::Drawing, "drawing base card");
    let mut surface = CardSurface::new(layout.canvas_width(), layout.canvas_height())?;
    surface.draw_base(layout, image, crop, placement)?;

    if card.filter != FilterKey::None {
        tracing::debug!(phase = ?ExportPhase::Filtering, "applying filter");
        filter_straight_alpha(surface.data_mut(), card.filter)?;
    }

    tracing::debug!(phase = ?ExportPhase::TextOverlay, "laying out text");
    let lines = layout_text_lines(card, layout, fonts)?;
    surface.draw_text(&lines)?;

    tracing::debug!(phase = ?ExportPhase::Encoded, "encoding png");
    let (mut pixels, w, h) = surface.into_premul_rgba8();
    crate::encode::png::unpremultiply_rgba8_in_place(&mut pixels);
    let png_bytes = crate::encode::png::encode_png(&pixels, w, h)?;

    Ok(ExportedCard {
        png_bytes,
        file_name: file_name_for(&card.title, layout.hq),
    })
}

/// Run the filter over a premultiplied surface buffer.
///
/// The filter math is defined on straight-alpha channel values, same as the
/// preview. Contrast's mid-gray offset does not commute with
/// premultiplication, so the buffer is unpremultiplied around the filter.
fn filter_straight_alpha(data: &mut [u8], key: FilterKey) -> CardResult<()> {
    unpremultiply_rgba8_in_place(data);
    apply_filter(data, key)?;
    premultiply_rgba8_in_place(data);
    Ok(())
}

/// Lay out the title and optional date line, centered in the text area.
fn layout_text_lines(
    card: &Card,
    layout: &CardLayout,
    fonts: &FontLibrary,
) -> CardResult<Vec<TextLine>> {
    let font_bytes = fonts.get(card.font)?;
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    let mut engine = TextLayoutEngine::new();
    let scale = layout.font_scale();

    let mut lines = Vec::with_capacity(2);

    let title_size = card.font_size_px * scale;
    lines.push(centered_line(
        &mut engine,
        &font,
        card.display_title(),
        font_bytes.as_slice(),
        title_size,
        card.title_style,
        card.text_color,
        layout.title_center_y(),
        layout.canvas_width(),
        scale,
    )?);

    if let Some(date) = card.date {
        lines.push(centered_line(
            &mut engine,
            &font,
            &format_display_date(date),
            font_bytes.as_slice(),
            layout.date_size_px,
            card.date_style,
            layout.date_color,
            layout.title_center_y() + layout.date_gap,
            layout.canvas_width(),
            scale,
        )?);
    }

    Ok(lines)
}

#[allow(clippy::too_many_arguments)]
fn centered_line(
    engine: &mut TextLayoutEngine,
    font: &vello_cpu::peniko::FontData,
    text: &str,
    font_bytes: &[u8],
    size_px: f32,
    style: TextStyle,
    color: Rgba8,
    center_y: f64,
    canvas_width: u32,
    scale: f32,
) -> CardResult<TextLine> {
    let brush = TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    };
    let parley_layout = engine.layout_styled(
        text,
        font_bytes,
        size_px,
        style.bold,
        style.italic,
        brush,
        None,
    )?;

    let text_w = f64::from(parley_layout.width());
    let text_h = f64::from(parley_layout.height());
    let origin = Point::new(
        (f64::from(canvas_width) - text_w) / 2.0,
        center_y - text_h / 2.0,
    );

    let underline = style.underline.then(|| {
        let y = center_y + f64::from(size_px) / 2.0 + 2.0 * f64::from(scale);
        let thickness = 1.5 * f64::from(scale);
        Rect::new(origin.x, y, origin.x + text_w, y + thickness)
    });

    Ok(TextLine {
        layout: parley_layout,
        font: font.clone(),
        origin,
        underline,
        color,
    })
}

/// Download file name derived from the title. Whitespace runs become single
/// underscores; a blank title falls back to `photo` (or `photo_hq`).
pub fn file_name_for(title: &str, hq: bool) -> String {
    let stem: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        return if hq {
            "photo_hq.png".to_string()
        } else {
            "photo.png".to_string()
        };
    }
    format!("{stem}.png")
}
