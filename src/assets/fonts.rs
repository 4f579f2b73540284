use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    composition::model::FontFamily,
    foundation::error::{CardError, CardResult},
};

/// RGBA8 brush color carried through parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Font bytes keyed by card font family.
///
/// Families resolve to raw TTF/OTF bytes registered by the host (explicitly
/// or by scanning a directory). When a family has no exact match the first
/// scanned font acts as a fallback, so cards still export on systems without
/// the reference families installed.
#[derive(Clone, Debug, Default)]
pub struct FontLibrary {
    bytes_by_family: HashMap<FontFamily, Arc<Vec<u8>>>,
    fallback: Option<Arc<Vec<u8>>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes for one family.
    pub fn register(&mut self, family: FontFamily, bytes: Vec<u8>) {
        let bytes = Arc::new(bytes);
        if self.fallback.is_none() {
            self.fallback = Some(bytes.clone());
        }
        self.bytes_by_family.insert(family, bytes);
    }

    /// Register fallback bytes used for families with no exact match.
    pub fn register_fallback(&mut self, bytes: Vec<u8>) {
        self.fallback = Some(Arc::new(bytes));
    }

    /// Resolve the bytes for a family, falling back if necessary.
    pub fn get(&self, family: FontFamily) -> CardResult<Arc<Vec<u8>>> {
        if let Some(b) = self.bytes_by_family.get(&family) {
            return Ok(b.clone());
        }
        self.fallback.clone().ok_or_else(|| {
            CardError::validation(format!(
                "no font registered for family '{}' and no fallback available",
                family.display_name()
            ))
        })
    }

    /// Whether any font at all is available.
    pub fn is_empty(&self) -> bool {
        self.bytes_by_family.is_empty() && self.fallback.is_none()
    }

    /// Scan a directory (two levels deep) for ttf/otf/ttc files, matching
    /// file names against the known families. Returns how many files were
    /// taken. Unreadable entries are skipped.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        self.load_dir_depth(dir, 2)
    }

    /// Scan the usual OS font locations.
    pub fn load_system_dirs(&mut self) -> usize {
        let mut taken = 0;
        for dir in ["/usr/share/fonts", "/usr/local/share/fonts", "/Library/Fonts"] {
            taken += self.load_dir_depth(Path::new(dir), 4);
        }
        if let Some(home) = std::env::var_os("HOME") {
            let home = Path::new(&home);
            taken += self.load_dir_depth(&home.join(".fonts"), 3);
            taken += self.load_dir_depth(&home.join(".local/share/fonts"), 3);
        }
        taken
    }

    fn load_dir_depth(&mut self, dir: &Path, depth: u32) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return 0;
        };

        let mut taken = 0;
        for entry in rd.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if depth > 0 {
                    taken += self.load_dir_depth(&path, depth - 1);
                }
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" && ext != "ttc" {
                continue;
            }
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_ascii_lowercase();
            match family_for_file_stem(&stem) {
                Some(family) => self.register(family, bytes),
                None => {
                    if self.fallback.is_none() {
                        self.fallback = Some(Arc::new(bytes));
                    } else {
                        continue;
                    }
                }
            }
            taken += 1;
        }
        taken
    }
}

fn family_for_file_stem(stem: &str) -> Option<FontFamily> {
    // Loose matching on common file names; regular cuts only.
    if stem.contains("bold") || stem.contains("italic") || stem.contains("oblique") {
        return None;
    }
    if stem.contains("comic") {
        Some(FontFamily::ComicSans)
    } else if stem.contains("courier") {
        Some(FontFamily::Courier)
    } else if stem.contains("times") {
        Some(FontFamily::Times)
    } else if stem.contains("arial") {
        Some(FontFamily::Arial)
    } else if stem.contains("georgia") {
        Some(FontFamily::Georgia)
    } else if stem.contains("verdana") {
        Some(FontFamily::Verdana)
    } else {
        None
    }
}

/// Stateful helper for building parley layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out a single run of styled text using provided font
    /// bytes. Returns the built layout with lines broken (unbounded width
    /// unless `max_width_px` is set).
    pub fn layout_styled(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        bold: bool,
        italic: bool,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation("text size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(if bold {
            parley::style::FontWeight::BOLD
        } else {
            parley::style::FontWeight::NORMAL
        }));
        builder.push_default(parley::style::StyleProperty::FontStyle(if italic {
            parley::style::FontStyle::Italic
        } else {
            parley::style::FontStyle::Normal
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}
