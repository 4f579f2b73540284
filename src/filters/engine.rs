//! Per-pixel filter application over flat RGBA8 buffers.
//!
//! The export path cannot reuse the browser-style filter shorthand, so every
//! step is spelled out as explicit channel math. Steps chain in f64 without
//! intermediate clamping; the final value is clamped to [0,255] and truncated
//! to 8 bits. The alpha channel is never modified.

use crate::{
    filters::spec::{FilterKey, FilterStep},
    foundation::error::{CardError, CardResult},
};

/// Apply `key`'s transform steps to every pixel of `data` in place.
///
/// `data` is row-major RGBA8; its length must be a multiple of 4.
/// `FilterKey::None` leaves the buffer bit-identical.
pub fn apply_filter(data: &mut [u8], key: FilterKey) -> CardResult<()> {
    if !data.len().is_multiple_of(4) {
        return Err(CardError::validation(
            "apply_filter expects an rgba8 buffer (length % 4 == 0)",
        ));
    }

    let steps = key.steps();
    if steps.is_empty() {
        return Ok(());
    }

    for px in data.chunks_exact_mut(4) {
        let rgb = apply_steps(
            steps,
            [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])],
        );
        px[0] = quantize(rgb[0]);
        px[1] = quantize(rgb[1]);
        px[2] = quantize(rgb[2]);
    }
    Ok(())
}

/// Run one pixel through an ordered step list. Channels are unclamped f64
/// throughout; callers quantize afterwards.
pub fn apply_steps(steps: &[FilterStep], mut rgb: [f64; 3]) -> [f64; 3] {
    for step in steps {
        rgb = apply_step(*step, rgb);
    }
    rgb
}

fn apply_step(step: FilterStep, [r, g, b]: [f64; 3]) -> [f64; 3] {
    match step {
        FilterStep::Grayscale => {
            let luma = luma_rec601(r, g, b);
            [luma, luma, luma]
        }
        FilterStep::Sepia { amount } => {
            let tr = 0.393 * r + 0.769 * g + 0.189 * b;
            let tg = 0.349 * r + 0.686 * g + 0.168 * b;
            let tb = 0.272 * r + 0.534 * g + 0.131 * b;
            [
                r + (tr - r) * amount,
                g + (tg - g) * amount,
                b + (tb - b) * amount,
            ]
        }
        FilterStep::Saturate { amount } => {
            let luma = 0.2989 * r + 0.587 * g + 0.114 * b;
            [
                luma + (r - luma) * amount,
                luma + (g - luma) * amount,
                luma + (b - luma) * amount,
            ]
        }
        FilterStep::Contrast { amount } => {
            let adjust = |c: f64| ((c / 255.0 - 0.5) * amount + 0.5) * 255.0;
            [adjust(r), adjust(g), adjust(b)]
        }
        FilterStep::Brightness { amount } => [r * amount, g * amount, b * amount],
        FilterStep::HueRotate { degrees } => {
            let (sin, cos) = degrees.to_radians().sin_cos();
            let nr = r * (0.213 + cos * 0.787 - sin * 0.213)
                + g * (0.715 - cos * 0.715 - sin * 0.715)
                + b * (0.072 - cos * 0.072 + sin * 0.928);
            let ng = r * (0.213 - cos * 0.213 + sin * 0.143)
                + g * (0.715 + cos * 0.285 + sin * 0.140)
                + b * (0.072 - cos * 0.072 - sin * 0.283);
            let nb = r * (0.213 - cos * 0.213 - sin * 0.787)
                + g * (0.715 - cos * 0.715 + sin * 0.715)
                + b * (0.072 + cos * 0.928 + sin * 0.072);
            [nr, ng, nb]
        }
    }
}

// Integer-weighted form keeps equal channels exact, so grayscale composed
// with itself is a fixed point after quantization.
fn luma_rec601(r: f64, g: f64, b: f64) -> f64 {
    (299.0 * r + 587.0 * g + 114.0 * b) / 1000.0
}

fn quantize(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/filters/engine.rs"]
mod tests;
