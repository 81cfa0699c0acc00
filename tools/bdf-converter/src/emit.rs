//! Rendering of a [`FontLayout`] as GFX font source declarations.

use std::io::{self, Write};

use gfx_font::layout::{FontDescriptor, FontLayout, GlyphEntry};

/// The number of bitmap bytes written per line.
const BYTES_PER_LINE: usize = 12;

/// Writes the bitmap array, glyph table and font descriptor of `layout` to `writer`.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn emit_font<W: Write>(layout: &FontLayout, mut writer: W) -> io::Result<()> {
    emit_bitmaps(&mut writer, &layout.descriptor, &layout.bitmaps)?;
    emit_glyphs(&mut writer, &layout.descriptor, &layout.glyphs)?;
    emit_descriptor(&mut writer, &layout.descriptor)
}

/// Writes the `PROGMEM` bitmap array.
fn emit_bitmaps<W: Write>(
    writer: &mut W,
    descriptor: &FontDescriptor,
    bitmaps: &[u8],
) -> io::Result<()> {
    writeln!(
        writer,
        "const uint8_t {}[] PROGMEM = {{",
        descriptor.bitmaps_symbol()
    )?;

    for (index, byte) in bitmaps.iter().enumerate() {
        if index % BYTES_PER_LINE == 0 {
            write!(writer, "\n  ")?;
        }
        write!(writer, "0x{byte:02X}")?;
        if index + 1 < bitmaps.len() {
            write!(writer, ", ")?;
        }
    }

    writeln!(writer, "\n}};")?;
    writeln!(writer)
}

/// Writes the `GFXglyph` table.
fn emit_glyphs<W: Write>(
    writer: &mut W,
    descriptor: &FontDescriptor,
    glyphs: &[GlyphEntry],
) -> io::Result<()> {
    writeln!(
        writer,
        "const GFXglyph {}[] PROGMEM = {{",
        descriptor.glyphs_symbol()
    )?;

    for (index, glyph) in glyphs.iter().enumerate() {
        write!(
            writer,
            "  {{ {}, {}, {}, {}, {}, {} }}",
            glyph.bitmap_offset,
            glyph.width,
            glyph.height,
            glyph.advance,
            glyph.x_offset,
            glyph.y_offset
        )?;
        if index + 1 < glyphs.len() {
            writeln!(writer, ",")?;
        } else {
            writeln!(writer)?;
        }
    }

    writeln!(writer, "}};")?;
    writeln!(writer)
}

/// Writes the `GFXfont` descriptor.
fn emit_descriptor<W: Write>(writer: &mut W, descriptor: &FontDescriptor) -> io::Result<()> {
    writeln!(writer, "const GFXfont {} PROGMEM = {{", descriptor.identifier)?;
    writeln!(writer, "  (uint8_t  *){},", descriptor.bitmaps_symbol())?;
    writeln!(writer, "  (GFXglyph *){},", descriptor.glyphs_symbol())?;
    writeln!(
        writer,
        "  {}, {}, {} }};",
        descriptor.first_code, descriptor.last_code, descriptor.pixel_size
    )
}

#[cfg(test)]
mod test {
    use gfx_font::layout::{FontDescriptor, FontLayout, GlyphEntry};

    use super::emit_font;

    fn descriptor(first_code: i32, last_code: i32) -> FontDescriptor {
        FontDescriptor {
            identifier: "Fixed9ptLat1".into(),
            first_code,
            last_code,
            pixel_size: 9,
        }
    }

    fn entry(bitmap_offset: usize) -> GlyphEntry {
        GlyphEntry {
            bitmap_offset,
            width: 5,
            height: 1,
            advance: 6,
            x_offset: 0,
            y_offset: -1,
        }
    }

    fn render(layout: &FontLayout) -> String {
        let mut output = Vec::new();
        emit_font(layout, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn single_glyph() {
        let layout = FontLayout {
            bitmaps: vec![0x20, 0x50, 0x88, 0x88, 0xF8, 0x88, 0x88],
            glyphs: vec![GlyphEntry {
                bitmap_offset: 0,
                width: 5,
                height: 7,
                advance: 6,
                x_offset: 0,
                y_offset: 0,
            }],
            descriptor: descriptor(65, 65),
        };

        let expected = "\
const uint8_t Fixed9ptLat1Bitmaps[] PROGMEM = {

  0x20, 0x50, 0x88, 0x88, 0xF8, 0x88, 0x88
};

const GFXglyph Fixed9ptLat1Glyphs[] PROGMEM = {
  { 0, 5, 7, 6, 0, 0 }
};

const GFXfont Fixed9ptLat1 PROGMEM = {
  (uint8_t  *)Fixed9ptLat1Bitmaps,
  (GFXglyph *)Fixed9ptLat1Glyphs,
  65, 65, 9 };
";
        assert_eq!(render(&layout), expected);
    }

    #[test]
    fn bitmap_wraps_every_twelve_bytes() {
        let layout = FontLayout {
            bitmaps: (0..13).collect(),
            glyphs: Vec::new(),
            descriptor: descriptor(1, 0),
        };

        let output = render(&layout);
        let lines = output.lines().take(5).collect::<Vec<_>>();

        assert_eq!(
            lines,
            [
                "const uint8_t Fixed9ptLat1Bitmaps[] PROGMEM = {",
                "",
                "  0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, ",
                "  0x0C",
                "};",
            ]
        );
    }

    #[test]
    fn glyph_entries_are_comma_separated() {
        let layout = FontLayout {
            bitmaps: vec![0xF8, 0x70],
            glyphs: vec![entry(0), entry(1)],
            descriptor: descriptor(65, 66),
        };

        let output = render(&layout);

        assert!(output.contains(
            "const GFXglyph Fixed9ptLat1Glyphs[] PROGMEM = {\n  \
             { 0, 5, 1, 6, 0, -1 },\n  \
             { 1, 5, 1, 6, 0, -1 }\n};\n"
        ));
        assert!(output.ends_with("  65, 66, 9 };\n"));
    }

    #[test]
    fn empty_font() {
        let layout = FontLayout {
            bitmaps: Vec::new(),
            glyphs: Vec::new(),
            descriptor: descriptor(FontDescriptor::EMPTY_FIRST_CODE, FontDescriptor::EMPTY_LAST_CODE),
        };

        let expected = "\
const uint8_t Fixed9ptLat1Bitmaps[] PROGMEM = {

};

const GFXglyph Fixed9ptLat1Glyphs[] PROGMEM = {
};

const GFXfont Fixed9ptLat1 PROGMEM = {
  (uint8_t  *)Fixed9ptLat1Bitmaps,
  (GFXglyph *)Fixed9ptLat1Glyphs,
  1, 0, 9 };
";
        assert_eq!(render(&layout), expected);
    }
}
