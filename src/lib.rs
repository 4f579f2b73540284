//! Photocard is a CPU engine for composing decorated photo cards.
//!
//! A card is a framed photo with a caption: a source image cover-fit into a
//! fixed 4:3 area with optional zoom and pan, an optional named color filter,
//! and a title plus date line below, all flattened to a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `Card + image dimensions -> CropRect + placement` (which
//!    source pixels land where)
//! 2. **Draw**: rounded card background, image well, clipped image (CPU
//!    rasterizer)
//! 3. **Filter**: per-pixel colorimetric steps over the flattened base
//! 4. **Text**: title/date glyphs composited over the filtered pixels
//! 5. **Encode**: straight-alpha RGBA8 to PNG bytes
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Preview parity**: the exported pixels reproduce what the interactive
//!   preview shows, including the CSS-equivalent filter math.
//! - **Premultiplied RGBA8** end-to-end: only the PNG encoder sees straight
//!   alpha.
#![forbid(unsafe_code)]

mod assets;
mod composition;
mod editor;
mod encode;
mod filters;
mod foundation;
mod geometry;
mod render;

pub use assets::decode::{PreparedImage, decode_image, decode_image_file};
pub use assets::fonts::{FontLibrary, TextBrushRgba8, TextLayoutEngine};
pub use composition::model::{
    Card, CardLayout, FONT_SIZE_MAX, FONT_SIZE_MIN, FontFamily, TITLE_MAX_CHARS, TextStyle,
    ZOOM_MAX, ZOOM_MIN, ZOOM_STEP_BUTTON, ZOOM_STEP_WHEEL, format_display_date,
};
pub use editor::Editor;
pub use encode::png::{encode_png, unpremultiply_rgba8_in_place};
pub use filters::engine::apply_filter;
pub use filters::spec::{FilterKey, FilterStep};
pub use foundation::color::{parse_hex, to_hex};
pub use foundation::core::{Point, Rect, Rgba8, Vec2};
pub use foundation::error::{CardError, CardResult};
pub use geometry::crop::{CropRect, clamp_pan, max_pan, resolve_crop, resolve_placement};
pub use render::pipeline::{ExportPhase, ExportedCard, export_card, file_name_for};
