//! The font header, glyph metadata table and font descriptor of a packed GFX font.

use alloc::{format, string::String, vec::Vec};

use crate::glyph::GlyphCollection;

/// Font-wide information used to name the generated symbols.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontHeader {
    /// The family name, restricted to ASCII letters and digits.
    family_name: String,
    /// The nominal pixel size of the font.
    pixel_size: u32,
}

impl FontHeader {
    /// The family name used when the source names none.
    pub const DEFAULT_FAMILY_NAME: &'static str = "Font";
    /// The pixel size used when the source declares none.
    pub const DEFAULT_PIXEL_SIZE: u32 = 9;

    /// Creates a new [`FontHeader`], discarding every character of `family_name` that is not an
    /// ASCII letter or digit.
    pub fn new(family_name: &str, pixel_size: u32) -> Self {
        let family_name = family_name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();

        Self {
            family_name,
            pixel_size,
        }
    }

    /// Returns the sanitized family name.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Returns the nominal pixel size.
    pub const fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Returns the prefix shared by every generated symbol.
    ///
    /// The `ptLat1` suffix is a fixed naming convention and does not reflect the selected range.
    pub fn identifier(&self) -> String {
        format!("{}{}ptLat1", self.family_name, self.pixel_size)
    }
}

impl Default for FontHeader {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAMILY_NAME, Self::DEFAULT_PIXEL_SIZE)
    }
}

/// The metadata entry for one glyph in the packed bitmap.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GlyphEntry {
    /// Offset of the glyph's first byte within the packed bitmap.
    pub bitmap_offset: usize,
    /// Width of the glyph's bounding box.
    pub width: u32,
    /// Height of the glyph's bounding box.
    pub height: u32,
    /// Cursor advance after the glyph.
    pub advance: i32,
    /// Horizontal bounding box offset.
    pub x_offset: i32,
    /// Vertical bounding box offset.
    pub y_offset: i32,
}

/// The record tying the bitmap and glyph table together.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Prefix of every generated symbol.
    pub identifier: String,
    /// The first character code covered.
    pub first_code: i32,
    /// The last character code covered.
    pub last_code: i32,
    /// The nominal pixel size.
    pub pixel_size: u32,
}

impl FontDescriptor {
    /// First code written for a font without glyphs.
    ///
    /// Paired with [`FontDescriptor::EMPTY_LAST_CODE`] this forms a range no character falls in.
    pub const EMPTY_FIRST_CODE: i32 = 1;
    /// Last code written for a font without glyphs.
    pub const EMPTY_LAST_CODE: i32 = 0;

    /// Returns the name of the packed bitmap symbol.
    pub fn bitmaps_symbol(&self) -> String {
        format!("{}Bitmaps", self.identifier)
    }

    /// Returns the name of the glyph table symbol.
    pub fn glyphs_symbol(&self) -> String {
        format!("{}Glyphs", self.identifier)
    }
}

/// A fully laid out font, ready to be emitted.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontLayout {
    /// The packed bitmap of every glyph.
    pub bitmaps: Vec<u8>,
    /// One entry per glyph, in ascending character code order.
    pub glyphs: Vec<GlyphEntry>,
    /// The font descriptor.
    pub descriptor: FontDescriptor,
}

impl FontLayout {
    /// Lays out `glyphs` against `bitmaps`, the result of
    /// [`pack_bitmaps`][crate::bitmap::pack_bitmaps] on the same collection.
    ///
    /// Each glyph's offset is the running total of `rows * ceil(width / 8)` over the glyphs
    /// before it.
    pub fn new(header: &FontHeader, glyphs: &GlyphCollection, bitmaps: Vec<u8>) -> Self {
        let mut bitmap_offset = 0;
        let entries = glyphs
            .iter()
            .map(|glyph| {
                let metrics = glyph.metrics();
                let entry = GlyphEntry {
                    bitmap_offset,
                    width: metrics.width,
                    height: metrics.height,
                    advance: metrics.advance,
                    x_offset: metrics.x_offset,
                    y_offset: metrics.y_offset,
                };

                bitmap_offset += glyph.bitmap_size();
                entry
            })
            .collect();

        let descriptor = FontDescriptor {
            identifier: header.identifier(),
            first_code: glyphs
                .first_code()
                .unwrap_or(FontDescriptor::EMPTY_FIRST_CODE),
            last_code: glyphs
                .last_code()
                .unwrap_or(FontDescriptor::EMPTY_LAST_CODE),
            pixel_size: header.pixel_size(),
        };

        Self {
            bitmaps,
            glyphs: entries,
            descriptor,
        }
    }
}
