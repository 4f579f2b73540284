//! Stateful editing session wrapping a [`Card`] with clamped mutations.
//!
//! The editor mirrors interactive controls: every setter keeps the card
//! valid, so [`Editor::export`] never fails validation. Rejected inputs
//! (over-long titles, unparseable dates or colors, bad image bytes) leave the
//! previous state untouched.

use chrono::NaiveDate;

use crate::{
    assets::decode::{PreparedImage, decode_image},
    assets::fonts::FontLibrary,
    composition::model::{
        Card, CardLayout, FONT_SIZE_MAX, FONT_SIZE_MIN, FontFamily, TITLE_MAX_CHARS, TextStyle,
        ZOOM_MAX, ZOOM_MIN, ZOOM_STEP_BUTTON, ZOOM_STEP_WHEEL,
    },
    filters::spec::FilterKey,
    foundation::color::parse_hex,
    foundation::core::Vec2,
    foundation::error::{CardError, CardResult},
    geometry::crop::clamp_pan,
    render::pipeline::{ExportedCard, export_card},
};

/// Interactive card editing session.
pub struct Editor {
    card: Card,
    image: Option<PreparedImage>,
    exporting: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            card: Card::default(),
            image: None,
            exporting: false,
        }
    }

    /// Current card state.
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// Currently loaded image, if any.
    pub fn image(&self) -> Option<&PreparedImage> {
        self.image.as_ref()
    }

    /// Decode and load a new source image. On decode failure the previous
    /// image stays loaded and the error is returned.
    pub fn load_image(&mut self, bytes: &[u8]) -> CardResult<()> {
        let prepared = decode_image(bytes)?;
        self.image = Some(prepared);
        Ok(())
    }

    /// Load an already decoded image.
    pub fn set_image(&mut self, image: PreparedImage) {
        self.image = Some(image);
    }

    /// Set the title, rejecting inputs over [`TITLE_MAX_CHARS`] characters.
    pub fn set_title(&mut self, title: &str) -> CardResult<()> {
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(CardError::validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        self.card.title = title.to_string();
        Ok(())
    }

    /// Set or clear the date from an ISO `YYYY-MM-DD` string.
    pub fn set_date_str(&mut self, date: &str) -> CardResult<()> {
        if date.is_empty() {
            self.card.date = None;
            return Ok(());
        }
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| CardError::validation(format!("invalid date '{date}': {e}")))?;
        self.card.date = Some(parsed);
        Ok(())
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.card.date = date;
    }

    pub fn set_title_style(&mut self, style: TextStyle) {
        self.card.title_style = style;
    }

    pub fn set_date_style(&mut self, style: TextStyle) {
        self.card.date_style = style;
    }

    pub fn set_font(&mut self, font: FontFamily) {
        self.card.font = font;
    }

    /// Set the title font size, clamped to the selectable range.
    pub fn set_font_size_px(&mut self, size: f32) {
        if size.is_finite() {
            self.card.font_size_px = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        }
    }

    /// Set the text color from a hex string.
    pub fn set_text_color_hex(&mut self, hex: &str) -> CardResult<()> {
        self.card.text_color = parse_hex(hex)?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: FilterKey) {
        self.card.filter = filter;
    }

    /// Step zoom up by the button increment.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.card.zoom + ZOOM_STEP_BUTTON);
    }

    /// Step zoom down by the button increment.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.card.zoom - ZOOM_STEP_BUTTON);
    }

    /// Step zoom by one wheel notch, positive meaning in.
    pub fn wheel_zoom(&mut self, direction_in: bool) {
        let delta = if direction_in {
            ZOOM_STEP_WHEEL
        } else {
            -ZOOM_STEP_WHEEL
        };
        self.set_zoom(self.card.zoom + delta);
    }

    /// Set zoom directly, clamped to the valid range. Pan is re-clamped to
    /// the new zoom, and zeroed once zoom drops to 1 or below.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.card.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        self.reclamp_pan();
    }

    /// Set the pan offset, clamped to what the current zoom allows.
    pub fn set_pan(&mut self, pan: Vec2) {
        if !pan.x.is_finite() || !pan.y.is_finite() {
            return;
        }
        self.card.pan = pan;
        self.reclamp_pan();
    }

    /// Offset the pan by a drag delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.set_pan(self.card.pan + delta);
    }

    fn reclamp_pan(&mut self) {
        if self.card.zoom <= 1.0 {
            self.card.pan = Vec2::ZERO;
        } else {
            let layout = CardLayout::baseline();
            self.card.pan = clamp_pan(
                self.card.pan,
                self.card.zoom,
                layout.image_area_w,
                layout.image_area_h,
            );
        }
    }

    /// Reset all card state to defaults. The loaded image is kept.
    pub fn reset(&mut self) {
        self.card = Card::default();
    }

    /// Export the current card.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no image is loaded, or
    /// an export is already in flight. Matching the interactive behavior,
    /// neither case is an error.
    pub fn export(
        &mut self,
        layout: &CardLayout,
        fonts: &FontLibrary,
    ) -> CardResult<Option<ExportedCard>> {
        let Some(image) = self.image.as_ref() else {
            return Ok(None);
        };
        if self.exporting {
            return Ok(None);
        }

        self.exporting = true;
        let result = export_card(&self.card, image, layout, fonts);
        self.exporting = false;
        result.map(Some)
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
