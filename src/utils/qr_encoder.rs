use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, ImageFormat, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

use crate::models::qr_code::{EncodeOptions, PNG_SIGNATURE};
use crate::utils::font::{line_height, measure_text_width, wrap_text};

const BLACK: Luma<u8> = Luma([0u8]);
const WHITE: Luma<u8> = Luma([255u8]);

/// Space between the code and the caption, and below the caption
const CAPTION_PADDING: u32 = 8;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("content must not be empty")]
    EmptyContent,
    #[error("no caption font loaded, cannot display content")]
    MissingFont,
    #[error("unsupported image size {width}x{height}")]
    UnsupportedSize { width: u32, height: u32 },
    #[error("QR code generation error: {0}")]
    Qr(#[from] QrError),
    #[error("PNG encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders QR codes to PNG, optionally captioned with their content
pub struct QrEncoder {
    font: Option<FontVec>,
}

impl QrEncoder {
    pub fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Encode `content` as a PNG image
    pub fn encode(&self, content: &str, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
        let image = self.render(content, options)?;

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        debug_assert!(bytes.starts_with(&PNG_SIGNATURE));
        Ok(bytes)
    }

    /// Rasterize the code, sized the way ZXing's QR writer sizes it
    pub fn render(&self, content: &str, options: &EncodeOptions) -> Result<GrayImage, EncodeError> {
        if content.is_empty() {
            return Err(EncodeError::EmptyContent);
        }
        if options.width == 0 || options.height == 0 {
            return Err(EncodeError::UnsupportedSize {
                width: options.width,
                height: options.height,
            });
        }

        let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L)?;
        let modules = code.width() as u32;
        let full = modules + 2 * options.margin;

        let scale = (options.width / full).min(options.height / full).max(1);
        let code_size = full * scale;
        let (canvas_width, canvas_height) = if options.no_padding {
            (code_size, code_size)
        } else {
            (options.width.max(code_size), options.height.max(code_size))
        };

        let caption = if options.pure_barcode {
            None
        } else {
            let font = self.font.as_ref().ok_or(EncodeError::MissingFont)?;
            Some((font, layout_caption(font, content, canvas_width)))
        };
        let band_height = caption.as_ref().map_or(0, |(_, c)| c.band_height);

        let mut img = GrayImage::from_pixel(canvas_width, canvas_height + band_height, WHITE);

        let left = (canvas_width - code_size) / 2 + options.margin * scale;
        let top = (canvas_height - code_size) / 2 + options.margin * scale;
        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32) % modules;
            let y = (i as u32) / modules;
            let rect = Rect::at((left + x * scale) as i32, (top + y * scale) as i32)
                .of_size(scale, scale);
            draw_filled_rect_mut(&mut img, rect, BLACK);
        }

        if let Some((font, caption)) = caption {
            let mut y = (canvas_height + CAPTION_PADDING) as i32;
            for line in &caption.lines {
                let line_width = measure_text_width(font, caption.scale, line);
                let x = (canvas_width.saturating_sub(line_width) / 2) as i32;
                draw_text_mut(&mut img, BLACK, x, y, caption.scale, font, line);
                y += caption.line_height as i32;
            }
        }

        Ok(img)
    }
}

fn layout_caption(font: &FontVec, content: &str, canvas_width: u32) -> Caption {
    let scale = PxScale::from((canvas_width as f32 / 16.0).clamp(12.0, 48.0));
    let lh = line_height(font, scale).max(1);
    let max_width = canvas_width.saturating_sub(2 * CAPTION_PADDING).max(1);
    let lines = wrap_text(font, scale, content, max_width);
    Caption {
        band_height: lines.len() as u32 * lh + 2 * CAPTION_PADDING,
        line_height: lh,
        lines,
        scale,
    }
}

struct Caption {
    lines: Vec<String>,
    scale: PxScale,
    line_height: u32,
    band_height: u32,
}
