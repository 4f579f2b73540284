//! Crop/zoom/pan reconciliation between the on-screen preview and the export.
//!
//! The preview shows the source image cover-fit into a fixed-aspect area,
//! optionally scaled (`zoom`) and translated (`pan`) on screen. The export
//! samples the source directly, so the exact source rectangle the preview
//! displays has to be reconstructed here. The zoom range is asymmetric by
//! design: `zoom >= 1` samples a smaller source region (crop), while
//! `zoom < 1` keeps the full cover rectangle and shrinks the *destination*
//! placement instead (letterbox).

use crate::foundation::{
    core::{Rect, Vec2},
    error::{CardError, CardResult},
};

/// A source-image rectangle in source pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropRect {
    /// Whether this rectangle lies fully inside `[0,w] x [0,h]`.
    pub fn within(&self, source_w: u32, source_h: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.w > 0.0
            && self.h > 0.0
            && self.x + self.w <= f64::from(source_w) + 1e-6
            && self.y + self.h <= f64::from(source_h) + 1e-6
    }
}

/// Resolve the source rectangle the preview shows for the given state.
///
/// `area_w`/`area_h` are the on-screen image area dimensions; they define the
/// target aspect ratio and the unit in which `pan` is expressed. Pan offsets
/// convert to source pixels at the cover rectangle's scale per axis.
pub fn resolve_crop(
    source_w: u32,
    source_h: u32,
    area_w: f64,
    area_h: f64,
    zoom: f64,
    pan: Vec2,
) -> CardResult<CropRect> {
    if source_w == 0 || source_h == 0 {
        return Err(CardError::invalid_dimensions(format!(
            "{source_w}x{source_h}"
        )));
    }
    if !(area_w > 0.0) || !(area_h > 0.0) {
        return Err(CardError::validation("image area must be positive"));
    }
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(CardError::validation("zoom must be finite and > 0"));
    }

    let sw = f64::from(source_w);
    let sh = f64::from(source_h);
    let target_aspect = area_w / area_h;
    let source_aspect = sw / sh;

    // Largest centered rectangle of the target aspect that fits the source.
    let base = if source_aspect > target_aspect {
        let w = sh * target_aspect;
        CropRect {
            x: (sw - w) / 2.0,
            y: 0.0,
            w,
            h: sh,
        }
    } else {
        let h = sw / target_aspect;
        CropRect {
            x: 0.0,
            y: (sh - h) / 2.0,
            w: sw,
            h,
        }
    };

    if zoom < 1.0 {
        // Letterbox case: the shrink happens at draw time, not at sampling.
        return Ok(base);
    }

    let crop_w = base.w / zoom;
    let crop_h = base.h / zoom;

    // On-screen pan to source pixels, at the cover rectangle's scale.
    let kx = base.w / area_w;
    let ky = base.h / area_h;
    let center_x = base.x + base.w / 2.0 - pan.x * kx;
    let center_y = base.y + base.h / 2.0 - pan.y * ky;

    let x = (center_x - crop_w / 2.0).clamp(base.x, base.x + base.w - crop_w);
    let y = (center_y - crop_h / 2.0).clamp(base.y, base.y + base.h - crop_h);

    Ok(CropRect {
        x,
        y,
        w: crop_w,
        h: crop_h,
    })
}

/// Destination rectangle for the sampled image inside the image area.
///
/// `zoom >= 1` fills the area exactly; `zoom < 1` centers a zoom-scaled
/// rectangle, exposing the well background around it.
pub fn resolve_placement(area: Rect, zoom: f64) -> Rect {
    if zoom >= 1.0 {
        return area;
    }
    let w = area.width() * zoom;
    let h = area.height() * zoom;
    let x0 = area.x0 + (area.width() - w) / 2.0;
    let y0 = area.y0 + (area.height() - h) / 2.0;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

/// Largest pan magnitude per axis that keeps the crop inside the cover
/// rectangle, in on-screen units. Zero at `zoom <= 1`.
pub fn max_pan(zoom: f64, area_w: f64, area_h: f64) -> Vec2 {
    if zoom <= 1.0 {
        return Vec2::ZERO;
    }
    let slack = (1.0 - 1.0 / zoom) / 2.0;
    Vec2::new(area_w * slack, area_h * slack)
}

/// Clamp a pan offset into the valid range for the given zoom.
pub fn clamp_pan(pan: Vec2, zoom: f64, area_w: f64, area_h: f64) -> Vec2 {
    let max = max_pan(zoom, area_w, area_h);
    Vec2::new(pan.x.clamp(-max.x, max.x), pan.y.clamp(-max.y, max.y))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/crop.rs"]
mod tests;
