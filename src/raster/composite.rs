//! Premultiplied RGBA8 compositing operators.
//!
//! All buffers are tightly packed, row-major and premultiplied.

use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over with an extra opacity multiplier on the source.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = opacity_u16(opacity);
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Destination-out: keep `dst` only where `src` has no coverage.
pub(crate) fn destination_out(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    [
        mul_div255(u16::from(dst[0]), inv),
        mul_div255(u16::from(dst[1]), inv),
        mul_div255(u16::from(dst[2]), inv),
        mul_div255(u16::from(dst[3]), inv),
    ]
}

pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FlipbookResult<()> {
    check_lengths(dst, src, "over_in_place")?;
    if opacity <= 0.0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub(crate) fn destination_out_in_place(dst: &mut [u8], src: &[u8]) -> FlipbookResult<()> {
    check_lengths(dst, src, "destination_out_in_place")?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = destination_out([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Flatten one premultiplied pixel onto an opaque backdrop.
pub(crate) fn flatten_onto(backdrop: PremulRgba8, px: PremulRgba8) -> PremulRgba8 {
    over(backdrop, px, 1.0)
}

fn check_lengths(dst: &[u8], src: &[u8], op: &str) -> FlipbookResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FlipbookError::validation(format!(
            "{op} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

fn opacity_u16(opacity: f32) -> u16 {
    ((opacity * 255.0).round() as i32).clamp(0, 255) as u16
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
