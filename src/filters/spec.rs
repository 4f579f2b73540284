//! Named filters and their transform-step tables.
//!
//! Each filter key maps to an ordered list of colorimetric steps. Both the
//! CSS preview shorthand ([`FilterKey::css`]) and the pixel engine
//! ([`crate::filters::engine::apply_filter`]) derive from the same table, so
//! the live preview and the exported pixels cannot drift apart.

use std::fmt;

/// One per-pixel colorimetric transform with fixed parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterStep {
    /// Rec. 601 luminance grayscale.
    Grayscale,
    /// Blend toward the fixed sepia matrix by `amount` in [0,1].
    Sepia { amount: f64 },
    /// Scale chroma around luminance; 1.0 is identity.
    Saturate { amount: f64 },
    /// Scale contrast around mid-gray; 1.0 is identity.
    Contrast { amount: f64 },
    /// Multiply channels; 1.0 is identity.
    Brightness { amount: f64 },
    /// Luminance-preserving hue rotation.
    HueRotate { degrees: f64 },
}

impl FilterStep {
    /// CSS filter-function fragment for this step, e.g. `sepia(50%)`.
    pub fn css(self) -> String {
        fn pct(amount: f64) -> i64 {
            (amount * 100.0).round() as i64
        }

        match self {
            Self::Grayscale => "grayscale(100%)".to_string(),
            Self::Sepia { amount } => format!("sepia({}%)", pct(amount)),
            Self::Saturate { amount } => format!("saturate({}%)", pct(amount)),
            Self::Contrast { amount } => format!("contrast({}%)", pct(amount)),
            Self::Brightness { amount } => format!("brightness({}%)", pct(amount)),
            Self::HueRotate { degrees } => format!("hue-rotate({degrees}deg)"),
        }
    }
}

/// The fixed set of selectable filters.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum FilterKey {
    #[default]
    None,
    Grayscale,
    Sepia,
    Vintage,
    Warm,
    Cool,
    Fade,
    Vivid,
}

impl FilterKey {
    /// All keys, picker order.
    pub fn all() -> [Self; 8] {
        [
            Self::None,
            Self::Grayscale,
            Self::Sepia,
            Self::Vintage,
            Self::Warm,
            Self::Cool,
            Self::Fade,
            Self::Vivid,
        ]
    }

    /// Stable lowercase key used in serialized cards.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Fade => "fade",
            Self::Vivid => "vivid",
        }
    }

    /// Parse a key, defaulting unknown strings to [`FilterKey::None`].
    ///
    /// The UI only ever supplies values from the fixed set, so an unknown
    /// string is treated as "no filter" rather than an error.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            "vintage" => Self::Vintage,
            "warm" => Self::Warm,
            "cool" => Self::Cool,
            "fade" => Self::Fade,
            "vivid" => Self::Vivid,
            _ => Self::None,
        }
    }

    /// Ordered transform steps for this key. `None` has no steps.
    pub fn steps(self) -> &'static [FilterStep] {
        match self {
            Self::None => &[],
            Self::Grayscale => &[FilterStep::Grayscale],
            Self::Sepia => &[FilterStep::Sepia { amount: 1.0 }],
            Self::Vintage => &[
                FilterStep::Sepia { amount: 0.5 },
                FilterStep::Contrast { amount: 0.9 },
            ],
            Self::Warm => &[
                FilterStep::Sepia { amount: 0.3 },
                FilterStep::Saturate { amount: 1.4 },
            ],
            Self::Cool => &[
                FilterStep::Saturate { amount: 0.8 },
                FilterStep::HueRotate { degrees: 20.0 },
            ],
            Self::Fade => &[
                FilterStep::Contrast { amount: 0.9 },
                FilterStep::Brightness { amount: 1.1 },
                FilterStep::Saturate { amount: 0.8 },
            ],
            Self::Vivid => &[
                FilterStep::Saturate { amount: 1.5 },
                FilterStep::Contrast { amount: 1.1 },
            ],
        }
    }

    /// CSS filter shorthand for the live preview, e.g. `sepia(50%) contrast(90%)`.
    pub fn css(self) -> String {
        let steps = self.steps();
        if steps.is_empty() {
            return "none".to_string();
        }
        steps
            .iter()
            .map(|s| s.css())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterKey {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FilterKey> for &'static str {
    fn from(k: FilterKey) -> Self {
        k.as_str()
    }
}
