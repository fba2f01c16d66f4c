//! C header emission for the firmware build.

use std::io::{self, Write};

use crate::canvas::Canvas;
use crate::emoji::EmojiBitmap;
use crate::gfx::FontBitmap;

/// Hex bytes per line in the packed bitmap array.
const BYTES_PER_LINE: usize = 13;

/// Writes the GFX font header: the packed `Bitmaps[]` blob, the `Glyphs[]`
/// table with code point comments, and the font struct itself.
pub fn write_font_header<W: Write>(out: &mut W, font: &FontBitmap) -> io::Result<()> {
    write!(out, "const uint8_t {}Bitmaps[] PROGMEM = {{\n  ", font.name)?;
    for (i, byte) in font.bitmaps.iter().enumerate() {
        if i > 0 {
            if i % BYTES_PER_LINE == 0 {
                write!(out, ",\n  ")?;
            } else {
                write!(out, ", ")?;
            }
        }
        write!(out, "0x{byte:02X}")?;
    }
    write!(out, " }};\n\n")?;

    writeln!(out, "const GFXglyph {}Glyphs[] PROGMEM = {{", font.name)?;
    for (i, glyph) in font.glyphs.iter().enumerate() {
        write!(
            out,
            "  {{ {:5}, {:3}, {:3}, {:3}, {:4}, {:4} }}",
            glyph.bitmap_offset,
            glyph.width,
            glyph.height,
            glyph.x_advance,
            glyph.x_offset,
            glyph.y_offset
        )?;
        if i + 1 < font.glyphs.len() {
            let code = font.first + i as u32;
            write!(out, ",   // 0x{code:02X}")?;
            if let Some(ch) = char::from_u32(code) {
                if (' '..='~').contains(&ch) {
                    write!(out, " '{ch}'")?;
                }
            }
            writeln!(out)?;
        }
    }
    write!(out, " }};\n\n")?;

    writeln!(out, "const GFXfont {} PROGMEM = {{", font.name)?;
    writeln!(out, "  (uint8_t  *){}Bitmaps,", font.name)?;
    writeln!(out, "  (GFXglyph *){}Glyphs,", font.name)?;
    write!(
        out,
        "  0x{:02X}, 0x{:02X}, {} }};\n\n",
        font.first, font.last, font.line_height
    )?;

    // 7 bytes per glyph table entry plus the font struct
    writeln!(
        out,
        "// Approx. {} bytes",
        font.bitmaps.len() + font.glyphs.len() * 7 + 7
    )?;
    Ok(())
}

/// Writes the emoji bitmap header: one `7x7x3` array per emoji plus the
/// code-point lookup table.
pub fn write_emoji_header<W: Write>(out: &mut W, emojis: &[EmojiBitmap]) -> io::Result<()> {
    writeln!(out, "#ifndef EMOJI_BITMAPS_H")?;
    writeln!(out, "#define EMOJI_BITMAPS_H\n")?;
    writeln!(out, "#include <Arduino.h>\n")?;
    writeln!(out, "// Emoji bitmaps in RGB format, size: 7x7 pixels\n")?;

    for emoji in emojis {
        let utf8 = emoji.utf8_bytes();
        let decimal = utf8
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let hex = utf8
            .iter()
            .map(|b| format!("0x{b:02X}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "// Emoji: {} UTF-8: ({decimal}) [{hex}]",
            emoji.characters()
        )?;
        writeln!(out, "const uint8_t {}[7][7][3] = {{", emoji.array_name)?;
        for row in &emoji.pixels {
            let cells = row
                .iter()
                .map(|px| format!("{{0x{:02X}, 0x{:02X}, 0x{:02X}}}", px[0], px[1], px[2]))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "  {{{cells}}},")?;
        }
        writeln!(out, "}};\n")?;
    }

    writeln!(out, "struct Emoji {{")?;
    writeln!(out, "  uint32_t unicode;")?;
    writeln!(out, "  const uint8_t (*data)[7][3];")?;
    writeln!(out, "}};\n")?;
    writeln!(out, "const Emoji emojis[] = {{")?;
    for emoji in emojis {
        writeln!(out, "  {{0x{:08X}, {}}},", emoji.unicode(), emoji.array_name)?;
    }
    writeln!(out, "}};\n")?;
    writeln!(out, "const uint16_t emoji_count = {};\n", emojis.len())?;
    writeln!(out, "#endif // EMOJI_BITMAPS_H")?;
    Ok(())
}

/// Writes the LED coordinate tables the firmware's animation port indexes.
pub fn write_coordinates_header<W: Write>(out: &mut W, canvas: &Canvas) -> io::Result<()> {
    writeln!(out, "const float square_coordinates[{}][2] = {{", canvas.len())?;
    for point in canvas.points() {
        writeln!(out, "  {{{}, {}}},", point.x, point.y)?;
    }
    writeln!(out, "}};")?;
    writeln!(
        out,
        "const float canvas_center[2] = {{{}, {}}};",
        canvas.center_x(),
        canvas.center_y()
    )?;
    writeln!(
        out,
        "const float canvas_min_max_x[2] = {{{}, {}}};",
        canvas.min_x(),
        canvas.max_x()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SignPoint;
    use crate::emoji::EMOJI_SIZE;
    use crate::gfx::GlyphRecord;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn coordinates_header_lists_points_and_extents() {
        let canvas = Canvas::with_center(
            vec![
                SignPoint {
                    reference: String::from("P1"),
                    x: 1.5,
                    y: 2.0,
                    rotation: 0.0,
                },
                SignPoint {
                    reference: String::from("P2"),
                    x: 4.0,
                    y: 3.0,
                    rotation: 90.0,
                },
            ],
            2.75,
            2.5,
        );
        let header = render(|out| write_coordinates_header(out, &canvas));
        assert!(header.contains("const float square_coordinates[2][2] = {"));
        assert!(header.contains("  {1.5, 2},"));
        assert!(header.contains("const float canvas_center[2] = {2.75, 2.5};"));
        assert!(header.contains("const float canvas_min_max_x[2] = {1.5, 4};"));
    }

    #[test]
    fn font_header_formats_glyph_rows_and_footer() {
        let font = FontBitmap {
            name: String::from("test8pt7b"),
            bitmaps: vec![0xAB, 0x00, 0xFF],
            glyphs: vec![
                GlyphRecord {
                    bitmap_offset: 0,
                    width: 3,
                    height: 5,
                    x_advance: 4,
                    x_offset: 0,
                    y_offset: -5,
                },
                GlyphRecord {
                    bitmap_offset: 2,
                    width: 1,
                    height: 1,
                    x_advance: 2,
                    x_offset: 1,
                    y_offset: -1,
                },
            ],
            first: 0x41,
            last: 0x42,
            line_height: 10,
        };
        let header = render(|out| write_font_header(out, &font));
        assert!(header.starts_with("const uint8_t test8pt7bBitmaps[] PROGMEM = {\n  0xAB, 0x00, 0xFF };"));
        assert!(header.contains("const GFXglyph test8pt7bGlyphs[] PROGMEM = {"));
        assert!(header.contains("{     0,   3,   5,   4,    0,   -5 },   // 0x41 'A'"));
        assert!(header.contains("0x41, 0x42, 10 };"));
        // 3 bitmap bytes + 2 glyphs * 7 + 7
        assert!(header.contains("// Approx. 24 bytes"));
    }

    #[test]
    fn emoji_header_carries_table_and_count() {
        let emoji = EmojiBitmap {
            array_name: String::from("emoji_1f600"),
            code_points: vec![0x1F600],
            pixels: [[[0x10; 3]; EMOJI_SIZE as usize]; EMOJI_SIZE as usize],
        };
        let header = render(|out| write_emoji_header(out, &[emoji]));
        assert!(header.contains("#ifndef EMOJI_BITMAPS_H"));
        assert!(header.contains("const uint8_t emoji_1f600[7][7][3] = {"));
        assert!(header.contains("{0x10, 0x10, 0x10}"));
        assert!(header.contains("  {0x0001F600, emoji_1f600},"));
        assert!(header.contains("const uint16_t emoji_count = 1;"));
        assert!(header.contains("// Emoji: \u{1F600} UTF-8: (240, 159, 152, 128) [0xF0, 0x9F, 0x98, 0x80]"));
    }
}
