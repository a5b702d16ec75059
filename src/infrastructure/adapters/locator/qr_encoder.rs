//! QR Locator Encoder - 音频地址 -> 二维码 PNG data URL
//!
//! 实现 LocatorEncoderPort trait

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

use crate::application::ports::{EncodingError, LocatorEncoderPort};
use crate::domain::message::ScannableCode;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// 每个模块的像素边长
const MODULE_SIZE: u32 = 4;
/// 四周留白（模块数）
const QUIET_ZONE: u32 = 4;

/// 二维码编码器
#[derive(Debug, Clone, Copy, Default)]
pub struct QrLocatorEncoder;

impl QrLocatorEncoder {
    pub fn new() -> Self {
        Self
    }

    /// 按模块矩阵渲染灰度图：深色模块为黑，其余为白
    fn render(code: &QrCode) -> GrayImage {
        let width = code.width() as u32;
        let colors = code.to_colors();
        let side = (width + QUIET_ZONE * 2) * MODULE_SIZE;

        GrayImage::from_fn(side, side, |x, y| {
            let mx = (x / MODULE_SIZE) as i64 - QUIET_ZONE as i64;
            let my = (y / MODULE_SIZE) as i64 - QUIET_ZONE as i64;
            let inside = mx >= 0 && my >= 0 && mx < width as i64 && my < width as i64;
            if inside && colors[(my as u32 * width + mx as u32) as usize] == Color::Dark {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        })
    }
}

impl LocatorEncoderPort for QrLocatorEncoder {
    fn encode(&self, address: &str) -> Result<ScannableCode, EncodingError> {
        if address.is_empty() {
            return Err(EncodingError::EmptyAddress);
        }

        let code = QrCode::with_error_correction_level(address.as_bytes(), EcLevel::M)
            .map_err(|e| EncodingError::Failed(e.to_string()))?;
        let image = Self::render(&code);

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| EncodingError::Failed(e.to_string()))?;

        let data_url = format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png.into_inner()));
        ScannableCode::new(data_url).map_err(|e| EncodingError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// data URL -> PNG -> 二维码内容
    fn decode(code: &ScannableCode) -> String {
        let payload = code.as_str().strip_prefix(DATA_URL_PREFIX).unwrap();
        let png = STANDARD.decode(payload).unwrap();
        let image = image::load_from_memory(&png).unwrap().to_luma8();

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            image.width() as usize,
            image.height() as usize,
            |x, y| image.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn test_encode_roundtrip() {
        let encoder = QrLocatorEncoder::new();
        let addresses = [
            "http://localhost:3000/uploads/message-1700000000000-ab12cd34.mp3",
            "https://clinic.example.com/uploads/message-1.mp3?x=1&y=2",
            "a",
        ];

        for address in addresses {
            let code = encoder.encode(address).unwrap();
            assert!(code.as_str().starts_with(DATA_URL_PREFIX));
            assert_eq!(decode(&code), address);
        }
    }

    #[test]
    fn test_encode_is_deterministic_in_content() {
        let encoder = QrLocatorEncoder::new();
        let address = "http://localhost:3000/uploads/message-42.mp3";

        let first = encoder.encode(address).unwrap();
        let second = encoder.encode(address).unwrap();
        assert_eq!(decode(&first), decode(&second));
    }

    #[test]
    fn test_encode_empty_address_fails() {
        let err = QrLocatorEncoder::new().encode("").unwrap_err();
        assert!(matches!(err, EncodingError::EmptyAddress));
    }

    #[test]
    fn test_encode_oversized_address_fails() {
        let address = format!("http://localhost/{}", "x".repeat(5000));
        let err = QrLocatorEncoder::new().encode(&address).unwrap_err();
        assert!(matches!(err, EncodingError::Failed(_)));
    }
}
