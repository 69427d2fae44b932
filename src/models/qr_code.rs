/// Rendering options handed to the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub height: u32,
    pub width: u32,
    pub margin: u32,            // Quiet zone in modules
    pub pure_barcode: bool,     // No caption beneath the code
    pub no_padding: bool,       // Crop to the scaled code instead of the requested size
}

/// PNG magic bytes, every encoded image starts with them
pub const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];
