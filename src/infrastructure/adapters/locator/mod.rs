//! Locator Adapter - 二维码编码器

mod qr_encoder;

pub use qr_encoder::QrLocatorEncoder;
