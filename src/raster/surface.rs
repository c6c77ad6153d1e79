use crate::foundation::core::{CanvasSize, Rgba8};
use crate::foundation::error::{FlipbookError, FlipbookResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::raster::composite::{destination_out_in_place, flatten_onto, over_in_place};

/// A fixed-size premultiplied RGBA8 raster buffer.
///
/// Backed by a `vello_cpu` pixmap so strokes can be rasterized straight into it.
#[derive(Clone)]
pub struct Surface {
    size: CanvasSize,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("size", &self.size).finish()
    }
}

impl Surface {
    /// A fully transparent surface.
    pub fn new_transparent(size: CanvasSize) -> Self {
        let (w, h) = size.as_u16();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        pixmap.data_as_u8_slice_mut().fill(0);
        Self { size, pixmap }
    }

    /// A surface filled with one color.
    pub fn new_filled(size: CanvasSize, color: Rgba8) -> Self {
        let mut s = Self::new_transparent(size);
        s.fill(color);
        s
    }

    /// Build a surface of `size` and copy a decoded premultiplied image into it at (0, 0).
    ///
    /// Pixels outside the surface are clipped; uncovered area stays transparent.
    pub fn from_premul_rgba8(
        size: CanvasSize,
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> FlipbookResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FlipbookError::codec("image size overflow"))?;
        if bytes.len() != expected {
            return Err(FlipbookError::codec(format!(
                "image byte len mismatch: expected {expected}, got {}",
                bytes.len()
            )));
        }

        let mut out = Self::new_transparent(size);
        let copy_w = width.min(size.width) as usize;
        let copy_h = height.min(size.height) as usize;
        let dst_stride = size.width as usize * 4;
        let src_stride = width as usize * 4;
        let dst = out.data_mut();
        for y in 0..copy_h {
            let s = &bytes[y * src_stride..y * src_stride + copy_w * 4];
            dst[y * dst_stride..y * dst_stride + copy_w * 4].copy_from_slice(s);
        }
        Ok(out)
    }

    /// Surface dimensions.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let d = self.data();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.fill(Rgba8::TRANSPARENT);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for d in self.data_mut().chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Composite `src` over this surface at `opacity`.
    pub fn draw_over(&mut self, src: &Surface, opacity: f32) -> FlipbookResult<()> {
        self.check_same_size(src)?;
        over_in_place(self.data_mut(), src.data(), opacity)
    }

    /// Remove this surface's content wherever `coverage` has alpha.
    pub fn erase_with(&mut self, coverage: &Surface) -> FlipbookResult<()> {
        self.check_same_size(coverage)?;
        destination_out_in_place(self.data_mut(), coverage.data())
    }

    /// Straight-alpha RGBA8 copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    fn check_same_size(&self, other: &Surface) -> FlipbookResult<()> {
        if self.size != other.size {
            return Err(FlipbookError::validation(format!(
                "surface size mismatch: {}x{} vs {}x{}",
                self.size.width, self.size.height, other.size.width, other.size.height
            )));
        }
        Ok(())
    }
}

/// Report whether `surface` shows nothing but white once flattened onto an opaque white backdrop.
///
/// This is the authoritative emptiness test for a frame: it scans every pixel, so a frame that
/// was only drawn on with white ink (or fully erased) counts as blank.
pub fn is_blank(surface: &Surface) -> bool {
    let white = Rgba8::WHITE.to_premul();
    surface.data().chunks_exact(4).all(|px| {
        px[3] == 0 || flatten_onto(white, [px[0], px[1], px[2], px[3]]) == white
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
