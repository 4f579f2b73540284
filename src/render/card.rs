//! CPU rasterization of one card onto a pixel surface.

use std::sync::Arc;

use kurbo::Shape;

use crate::{
    assets::decode::PreparedImage,
    assets::fonts::TextBrushRgba8,
    composition::model::CardLayout,
    foundation::core::{Affine, BezPath, Point, Rect, Rgba8, RoundedRect},
    foundation::error::{CardError, CardResult},
    geometry::crop::CropRect,
    render::composite,
};

/// One laid-out text line ready to draw, in canvas coordinates.
pub struct TextLine {
    /// Shaped parley layout (single style run per line).
    pub layout: parley::Layout<TextBrushRgba8>,
    /// Font used for every glyph run in the layout.
    pub font: vello_cpu::peniko::FontData,
    /// Top-left corner of the layout box.
    pub origin: Point,
    /// Manual underline bar, already positioned.
    pub underline: Option<Rect>,
    /// Underline color (glyph color travels in the layout brush).
    pub color: Rgba8,
}

/// Output surface for one export, exclusively owned for its duration.
pub struct CardSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CardSurface {
    /// Allocate a transparent surface. Dimensions must fit the raster
    /// backend's u16 limit.
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| CardError::render("card width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| CardError::render("card height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(CardError::render("card dimensions must be non-zero"));
        }

        Ok(Self {
            width: width_u16,
            height: height_u16,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Draw the card background and the cropped source image.
    ///
    /// `crop` selects source pixels, `placement` is where they land inside
    /// the image area (the full area at `zoom >= 1`, a centered sub-rect when
    /// letterboxing). The image is clipped to the rounded image well.
    pub fn draw_base(
        &mut self,
        layout: &CardLayout,
        image: &PreparedImage,
        crop: CropRect,
        placement: Rect,
    ) -> CardResult<()> {
        let w = f64::from(self.width);
        let h = f64::from(self.height);

        let card_path = RoundedRect::new(0.0, 0.0, w, h, layout.card_radius).to_path(0.1);
        let well = Rect::new(
            layout.padding,
            layout.padding,
            layout.padding + layout.image_area_w,
            layout.padding + layout.image_area_h,
        );
        let well_path = RoundedRect::from_rect(well, layout.image_radius).to_path(0.1);

        let paint = image_paint(image)?;
        let sx = placement.width() / crop.w;
        let sy = placement.height() / crop.h;
        let to_canvas = Affine::translate((placement.x0, placement.y0))
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate((-crop.x, -crop.y));

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(layout.card_bg));
        ctx.fill_path(&bezpath_to_cpu(&card_path));

        ctx.set_paint(color_to_cpu(layout.well_bg));
        ctx.fill_path(&bezpath_to_cpu(&well_path));

        ctx.push_clip_layer(&bezpath_to_cpu(&well_path));
        ctx.set_transform(affine_to_cpu(to_canvas));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            crop.x,
            crop.y,
            crop.x + crop.w,
            crop.y + crop.h,
        ));
        ctx.pop_layer();

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    /// Raw premultiplied RGBA8 pixels, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    /// Rasterize text lines on a transparent overlay and composite it over
    /// the (already filtered) card.
    pub fn draw_text(&mut self, lines: &[TextLine]) -> CardResult<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut overlay = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for line in lines {
            ctx.set_transform(affine_to_cpu(Affine::translate((
                line.origin.x,
                line.origin.y,
            ))));

            for l in line.layout.lines() {
                for item in l.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&line.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }

            if let Some(bar) = line.underline {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(line.color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    bar.x0, bar.y0, bar.x1, bar.y1,
                ));
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut overlay);

        composite::over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            overlay.data_as_u8_slice(),
        )
    }

    /// Consume the surface, returning premultiplied pixels and dimensions.
    pub fn into_premul_rgba8(self) -> (Vec<u8>, u32, u32) {
        let (w, h) = (self.width(), self.height());
        (self.pixmap.data_as_u8_slice().to_vec(), w, h)
    }
}

fn image_paint(image: &PreparedImage) -> CardResult<vello_cpu::Image> {
    let pixmap =
        premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CardError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
