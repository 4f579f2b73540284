//! PNG export encoding.
//!
//! The render surface holds premultiplied pixels; PNG stores straight alpha,
//! so the buffer is un-premultiplied before encoding.

use std::io::Cursor;

use crate::foundation::error::{CardError, CardResult};

/// Convert premultiplied RGBA8 back to straight alpha in place.
pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 || a == 0 {
            continue;
        }
        px[0] = (((px[0] as u16) * 255 + a / 2) / a).min(255) as u8;
        px[1] = (((px[1] as u16) * 255 + a / 2) / a).min(255) as u8;
        px[2] = (((px[2] as u16) * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Encode straight-alpha RGBA8 pixels as a PNG byte stream.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> CardResult<Vec<u8>> {
    if rgba.len() != width as usize * height as usize * 4 {
        return Err(CardError::render("pixel buffer does not match dimensions"));
    }

    let mut out = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut out),
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CardError::render(format!("encode png: {e}")))?;
    Ok(out)
}
