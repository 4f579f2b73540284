use chrono::{Datelike, NaiveDate};

use crate::{
    filters::spec::FilterKey,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{CardError, CardResult},
};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 35;
/// Lower zoom bound (letterbox end of the range).
pub const ZOOM_MIN: f64 = 0.5;
/// Upper zoom bound (crop end of the range).
pub const ZOOM_MAX: f64 = 1.2;
/// Zoom increment for button-triggered changes.
pub const ZOOM_STEP_BUTTON: f64 = 0.1;
/// Zoom increment for wheel-triggered changes.
pub const ZOOM_STEP_WHEEL: f64 = 0.05;
/// Smallest selectable font size in pixels.
pub const FONT_SIZE_MIN: f32 = 12.0;
/// Largest selectable font size in pixels.
pub const FONT_SIZE_MAX: f32 = 36.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Bold/italic/underline flags, independently applicable to title and date.
pub struct TextStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
/// Fixed set of selectable font families.
pub enum FontFamily {
    #[default]
    ComicSans,
    Courier,
    Times,
    Arial,
    Georgia,
    Verdana,
}

impl FontFamily {
    /// CSS-style font stack used for the live preview and as the parley
    /// font-stack source when laying out text.
    pub fn stack(self) -> &'static str {
        match self {
            Self::ComicSans => "Comic Sans MS, cursive",
            Self::Courier => "Courier New, monospace",
            Self::Times => "Times New Roman, serif",
            Self::Arial => "Arial, sans-serif",
            Self::Georgia => "Georgia, serif",
            Self::Verdana => "Verdana, sans-serif",
        }
    }

    /// Human-facing name as shown in a font picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ComicSans => "Comic Sans",
            Self::Courier => "Courier",
            Self::Times => "Times",
            Self::Arial => "Arial",
            Self::Georgia => "Georgia",
            Self::Verdana => "Verdana",
        }
    }

    /// All selectable families, picker order.
    pub fn all() -> [Self; 6] {
        [
            Self::ComicSans,
            Self::Courier,
            Self::Times,
            Self::Arial,
            Self::Georgia,
            Self::Verdana,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative description of one photo card.
///
/// A card is a pure data model: it can be built via [`crate::Editor`] setters
/// or deserialized from JSON, then exported with
/// [`crate::export_card`]. The source image travels separately as a
/// [`crate::PreparedImage`]; everything here is presentation state.
pub struct Card {
    /// Caption shown below the image. At most [`TITLE_MAX_CHARS`] characters.
    #[serde(default = "default_title")]
    pub title: String,
    /// Optional date line rendered under the title.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Style flags for the title.
    #[serde(default)]
    pub title_style: TextStyle,
    /// Style flags for the date line.
    #[serde(default)]
    pub date_style: TextStyle,
    /// Font family for both text fields.
    #[serde(default)]
    pub font: FontFamily,
    /// Title font size in pixels, [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`].
    #[serde(default = "default_font_size")]
    pub font_size_px: f32,
    /// Title color.
    #[serde(default = "default_text_color", with = "crate::foundation::color::serde_hex")]
    pub text_color: Rgba8,
    /// Named filter applied to the whole card at export time.
    #[serde(default)]
    pub filter: FilterKey,
    /// Zoom factor, [`ZOOM_MIN`]..=[`ZOOM_MAX`]; 1.0 means no zoom.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Pan offset in on-screen pixels. Only meaningful when `zoom > 1`.
    #[serde(default)]
    pub pan: Vec2,
}

fn default_title() -> String {
    "My Photo".to_string()
}

fn default_font_size() -> f32 {
    18.0
}

fn default_text_color() -> Rgba8 {
    Rgba8::opaque(0x1a, 0x1a, 0x1a)
}

fn default_zoom() -> f64 {
    1.0
}

impl Default for Card {
    fn default() -> Self {
        Self {
            title: default_title(),
            date: None,
            title_style: TextStyle::default(),
            date_style: TextStyle::default(),
            font: FontFamily::default(),
            font_size_px: default_font_size(),
            text_color: default_text_color(),
            filter: FilterKey::default(),
            zoom: default_zoom(),
            pan: Vec2::ZERO,
        }
    }
}

impl Card {
    /// Validate invariants that deserialized cards may violate.
    pub fn validate(&self) -> CardResult<()> {
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(CardError::validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if !self.zoom.is_finite() || self.zoom < ZOOM_MIN || self.zoom > ZOOM_MAX {
            return Err(CardError::validation(format!(
                "zoom must be within [{ZOOM_MIN}, {ZOOM_MAX}]"
            )));
        }
        if !self.font_size_px.is_finite()
            || self.font_size_px < FONT_SIZE_MIN
            || self.font_size_px > FONT_SIZE_MAX
        {
            return Err(CardError::validation(format!(
                "font_size_px must be within [{FONT_SIZE_MIN}, {FONT_SIZE_MAX}]"
            )));
        }
        if self.zoom <= 1.0 && self.pan != Vec2::ZERO {
            return Err(CardError::validation("pan requires zoom > 1"));
        }
        if !self.pan.x.is_finite() || !self.pan.y.is_finite() {
            return Err(CardError::validation("pan must be finite"));
        }
        Ok(())
    }

    /// Display title, substituting the reference placeholder when blank.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { "Untitled" } else { &self.title }
    }
}

/// Format a date line as rendered on the card, e.g. `July 4, 2024`.
pub fn format_display_date(d: NaiveDate) -> String {
    format!("{} {}, {}", d.format("%B"), d.day(), d.year())
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Export geometry constants. All values are in output pixels.
///
/// The baseline numbers reproduce the reference preview card exactly; the HQ
/// profile scales every constant uniformly and switches the blank-title
/// filename fallback.
pub struct CardLayout {
    /// Image area width (4:3 with `image_area_h`).
    pub image_area_w: f64,
    /// Image area height.
    pub image_area_h: f64,
    /// Padding around the image area and below the text block.
    pub padding: f64,
    /// Height reserved for title/date below the image.
    pub text_area_h: f64,
    /// Corner radius of the image well.
    pub image_radius: f64,
    /// Corner radius of the outer card.
    pub card_radius: f64,
    /// Distance from the top of the text area to the title center line.
    pub title_center_offset: f64,
    /// Distance from the title center line down to the date center line.
    pub date_gap: f64,
    /// Fixed date font size in pixels.
    pub date_size_px: f32,
    /// Fixed date color.
    pub date_color: Rgba8,
    /// Card background fill.
    pub card_bg: Rgba8,
    /// Image well background, visible when letterboxing (`zoom < 1`).
    pub well_bg: Rgba8,
    /// Whether this is the HQ export profile.
    pub hq: bool,
}

impl CardLayout {
    /// Baseline layout matching the on-screen preview one-to-one.
    pub fn baseline() -> Self {
        Self::scaled(1.0, false)
    }

    /// High-quality export profile: the same card at 2x resolution.
    pub fn hq() -> Self {
        Self::scaled(2.0, true)
    }

    fn scaled(s: f64, hq: bool) -> Self {
        Self {
            image_area_w: 352.0 * s,
            image_area_h: 264.0 * s,
            padding: 20.0 * s,
            text_area_h: 80.0 * s,
            image_radius: 12.0 * s,
            card_radius: 16.0 * s,
            title_center_offset: 30.0 * s,
            date_gap: 28.0 * s,
            date_size_px: 12.0 * s as f32,
            date_color: Rgba8::opaque(0x9c, 0xa3, 0xaf),
            card_bg: Rgba8::WHITE,
            well_bg: Rgba8::opaque(0xf5, 0xf5, 0xf5),
            hq,
        }
    }

    /// Aspect ratio the source image is cover-fit against.
    pub fn target_aspect(&self) -> f64 {
        self.image_area_w / self.image_area_h
    }

    /// Total output width in pixels.
    pub fn canvas_width(&self) -> u32 {
        (self.image_area_w + self.padding * 2.0).round() as u32
    }

    /// Total output height in pixels.
    pub fn canvas_height(&self) -> u32 {
        (self.image_area_h + self.text_area_h + self.padding * 2.0).round() as u32
    }

    /// Y coordinate of the title center line.
    pub fn title_center_y(&self) -> f64 {
        self.image_area_h + self.padding + self.title_center_offset
    }

    /// Scale of the title font relative to the card's declared size.
    pub fn font_scale(&self) -> f32 {
        (self.image_area_w / 352.0) as f32
    }
}
