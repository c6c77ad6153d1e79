use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::frames::store::FrameData;
use crate::raster::surface::Surface;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A decoded frame image, premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub rgba8_premul: Vec<u8>,
}

/// Serialize a surface as a PNG data URL.
pub fn encode_surface(surface: &Surface) -> FlipbookResult<FrameData> {
    let size = surface.size();
    let img = image::RgbaImage::from_raw(size.width, size.height, surface.to_straight_rgba8())
        .ok_or_else(|| FlipbookError::codec("surface buffer does not match its size"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| FlipbookError::codec(format!("encode png: {e}")))?;

    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(FrameData::new(format!("{PNG_DATA_URL_PREFIX}{b64}")))
}

/// Decode a frame payload into premultiplied pixels.
///
/// Accepts `data:<mime>;base64,<bytes>` URLs and bare base64.
pub fn decode_frame_data(data: &FrameData) -> FlipbookResult<DecodedImage> {
    let bytes = payload_bytes(data.as_str())?;
    decode_image(&bytes).map_err(|e| FlipbookError::codec(format!("{e:#}")))
}

fn payload_bytes(payload: &str) -> FlipbookResult<Vec<u8>> {
    let b64 = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (meta, body) = rest
                .split_once(',')
                .ok_or_else(|| FlipbookError::codec("data url has no ',' separator"))?;
            if !meta.ends_with(";base64") {
                return Err(FlipbookError::codec("data url is not base64 encoded"));
            }
            body
        }
        None => payload,
    };
    base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|e| FlipbookError::codec(format!("invalid base64 payload: {e}")))
}

fn decode_image(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/frames/codec.rs"]
mod tests;
