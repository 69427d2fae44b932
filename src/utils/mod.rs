pub mod config;
pub mod font;
pub mod qr_encoder;
