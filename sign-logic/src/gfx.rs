//! Glyph rasterization and 1-bit packing for GFX-style bitmap fonts.
//!
//! Glyph pixels are packed row-major, MSB-first, and padded to a byte
//! boundary per glyph, so `bitmap_offset` always lands on a whole byte.

use fontdue::{Font, FontSettings};

use crate::error::ToolError;

pub const DEFAULT_FIRST_CODE_POINT: u32 = 0x20;
pub const DEFAULT_LAST_CODE_POINT: u32 = 0xFF;

/// Approximate resolution of the target display panel.
pub const DISPLAY_DPI: u32 = 141;

/// Coverage level at which an anti-aliased sample counts as set.
const MONO_THRESHOLD: u8 = 0x80;

/// Layout metrics for one glyph, in the order the firmware's glyph table
/// expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub bitmap_offset: u32,
    pub width: u8,
    pub height: u8,
    pub x_advance: u8,
    pub x_offset: i8,
    pub y_offset: i8,
}

/// A converted font: the packed bitmap blob plus per-glyph metrics over a
/// contiguous code point range.
#[derive(Debug, Clone)]
pub struct FontBitmap {
    pub name: String,
    pub bitmaps: Vec<u8>,
    pub glyphs: Vec<GlyphRecord>,
    pub first: u32,
    pub last: u32,
    pub line_height: u8,
}

/// MSB-first bit accumulator with per-byte flushes.
#[derive(Debug)]
pub struct BitPacker {
    acc: u8,
    mask: u8,
    out: Vec<u8>,
}

impl BitPacker {
    pub fn new() -> Self {
        Self {
            acc: 0,
            mask: 0x80,
            out: Vec::new(),
        }
    }

    pub fn push(&mut self, bit: bool) {
        if bit {
            self.acc |= self.mask;
        }
        self.mask >>= 1;
        if self.mask == 0 {
            self.out.push(self.acc);
            self.acc = 0;
            self.mask = 0x80;
        }
    }

    /// Pads with zero bits to the next byte boundary.
    pub fn pad_to_byte(&mut self) {
        while self.mask != 0x80 {
            self.push(false);
        }
    }

    pub fn len_bytes(&self) -> usize {
        self.out.len()
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.pad_to_byte();
        self.out
    }
}

impl Default for BitPacker {
    fn default() -> Self {
        Self::new()
    }
}

/// Packs a row-major monochrome bitmap, padded to a byte boundary.
pub fn pack_bitmap(pixels: &[bool]) -> Vec<u8> {
    let mut packer = BitPacker::new();
    for &px in pixels {
        packer.push(px);
    }
    packer.finish()
}

/// Reverses [`pack_bitmap`] for a `width x height` glyph.
pub fn unpack_bitmap(bytes: &[u8], width: usize, height: usize) -> Vec<bool> {
    (0..width * height)
        .map(|i| {
            let byte = bytes.get(i / 8).copied().unwrap_or(0);
            byte & (0x80 >> (i % 8)) != 0
        })
        .collect()
}

/// Rasterizes the `first..=last` code point range of a TrueType font into a
/// packed monochrome bitmap blob and glyph table, code-point ascending.
pub fn convert_font(
    data: &[u8],
    name: &str,
    size: u32,
    first: u32,
    last: u32,
) -> Result<FontBitmap, ToolError> {
    let font = Font::from_bytes(data, FontSettings::default()).map_err(ToolError::Font)?;
    // Half-point sizing at the panel's dpi, the scale the sign layout was
    // tuned for.
    let px = size as f32 * DISPLAY_DPI as f32 / 144.0;
    let line_height = font
        .horizontal_line_metrics(px)
        .map(|m| m.new_line_size)
        .unwrap_or(px);

    let mut packer = BitPacker::new();
    let mut glyphs = Vec::new();
    let mut bitmap_offset = 0u32;
    for code_point in first..=last {
        let ch = char::from_u32(code_point).unwrap_or('\u{FFFD}');
        let (metrics, coverage) = font.rasterize(ch, px);
        for &level in &coverage {
            packer.push(level >= MONO_THRESHOLD);
        }
        packer.pad_to_byte();

        let top = metrics.ymin + metrics.height as i32;
        glyphs.push(GlyphRecord {
            bitmap_offset,
            width: metrics.width as u8,
            height: metrics.height as u8,
            x_advance: metrics.advance_width.round() as u8,
            x_offset: metrics.xmin as i8,
            y_offset: (1 - top) as i8,
        });
        bitmap_offset += ((metrics.width * metrics.height + 7) / 8) as u32;
    }

    Ok(FontBitmap {
        name: name.to_string(),
        bitmaps: packer.finish(),
        glyphs,
        first,
        last,
        line_height: line_height.round() as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(width: usize, height: usize, pixels: &[bool]) {
        let packed = pack_bitmap(pixels);
        assert_eq!(packed.len(), (width * height + 7) / 8);
        assert_eq!(unpack_bitmap(&packed, width, height), pixels);
    }

    #[test]
    fn roundtrip_1x1() {
        roundtrip(1, 1, &[true]);
        roundtrip(1, 1, &[false]);
    }

    #[test]
    fn roundtrip_8x8() {
        let pixels: Vec<bool> = (0..64).map(|i| i % 3 == 0).collect();
        roundtrip(8, 8, &pixels);
    }

    #[test]
    fn roundtrip_3x5() {
        // the digit-like "3" shape
        #[rustfmt::skip]
        let pixels = [
            true, true, true,
            false, false, true,
            true, true, true,
            false, false, true,
            true, true, true,
        ];
        roundtrip(3, 5, &pixels);
    }

    #[test]
    fn packing_is_msb_first() {
        let packed = pack_bitmap(&[true, false, false, false, false, false, false, true]);
        assert_eq!(packed, vec![0x81]);
    }

    #[test]
    fn each_glyph_is_byte_padded() {
        let mut packer = BitPacker::new();
        for _ in 0..3 {
            packer.push(true);
        }
        packer.pad_to_byte();
        packer.push(true);
        assert_eq!(packer.finish(), vec![0xE0, 0x80]);
    }
}
