use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

/// Fonts probed when no caption font is configured
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load a TTF/OTF font from disk
pub fn load_font_file(path: &Path) -> Result<FontVec> {
    let data =
        fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    FontVec::try_from_vec(data)
        .map_err(|_| anyhow!("failed to parse font data (TTF/OTF) in {}", path.display()))
}

/// Resolve the caption font.
///
/// A configured path must load. Without one the usual system locations are
/// tried and `None` is returned when nothing usable is installed.
pub fn load_caption_font(configured: Option<&Path>) -> Result<Option<FontVec>> {
    if let Some(path) = configured {
        return load_font_file(path).map(Some);
    }

    for candidate in SYSTEM_FONT_PATHS {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_font_file(path) {
            Ok(font) => {
                log::info!("Using caption font {}", path.display());
                return Ok(Some(font));
            }
            Err(e) => log::debug!("Skipping font candidate: {:#}", e),
        }
    }

    Ok(None)
}

/// Pixel width of a string at the given scale
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

pub fn line_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Break text into lines no wider than `max_width` pixels.
///
/// Content is mostly URLs and WiFi strings without spaces, so lines are
/// broken per character rather than per word.
pub fn wrap_text<F: Font>(font: &F, scale: PxScale, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if measure_text_width(font, scale, &current) > max_width && current.chars().count() > 1 {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Font for tests that draw text, from `QRCODE_FONT_PATH` or the system
#[cfg(test)]
pub fn test_font() -> FontVec {
    let configured = std::env::var_os("QRCODE_FONT_PATH").map(std::path::PathBuf::from);
    load_caption_font(configured.as_deref())
        .expect("failed to load QRCODE_FONT_PATH")
        .expect("no caption font installed, set QRCODE_FONT_PATH")
}
