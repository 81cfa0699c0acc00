//! Packing of hexadecimal glyph rows into a flat bitmap.

use alloc::vec::Vec;
use core::{error, fmt, str::Chars};

use crate::glyph::GlyphCollection;

/// Packs the rows of every glyph in `glyphs`, in ascending character code order, into a single
/// byte sequence.
///
/// Each row is consumed two hexadecimal digits at a time; a dangling final digit of an odd-length
/// row is dropped. Digit pairs that are not valid hexadecimal are packed as `0x00` so that
/// subsequent glyph offsets stay aligned.
pub fn pack_bitmaps(glyphs: &GlyphCollection) -> Vec<u8> {
    let mut bitmaps = Vec::new();

    for glyph in glyphs {
        for row in glyph.rows() {
            for byte in row_bytes(row) {
                let byte = byte.unwrap_or_else(|error| {
                    log::warn!("glyph {}: {error}, packing 0x00", glyph.code());
                    0
                });
                bitmaps.push(byte);
            }
        }
    }

    bitmaps
}

/// Returns an [`Iterator`] over the bytes encoded by the hexadecimal `row`.
///
/// The row is consumed two characters at a time; a dangling final character is ignored.
pub fn row_bytes(row: &str) -> RowBytes<'_> {
    RowBytes {
        chars: row.chars(),
        position: 0,
    }
}

/// An [`Iterator`] over the bytes encoded by a hexadecimal row.
#[derive(Clone, Debug)]
pub struct RowBytes<'row> {
    /// The unconsumed characters of the row.
    chars: Chars<'row>,
    /// The character offset of the next digit pair within the row.
    position: usize,
}

impl Iterator for RowBytes<'_> {
    type Item = Result<u8, HexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut lookahead = self.chars.clone();
        let high = lookahead.next()?;
        let low = lookahead.next()?;

        let position = self.position;
        self.chars = lookahead;
        self.position += 2;

        let byte = match (hex_value(high), hex_value(low)) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => Err(HexError {
                digits: [high, low],
                position,
            }),
        };
        Some(byte)
    }
}

/// Returns the value of the hexadecimal `digit`.
fn hex_value(digit: char) -> Option<u8> {
    digit
        .to_digit(16)
        .and_then(|value| u8::try_from(value).ok())
}

/// A digit pair in a bitmap row that is not valid hexadecimal.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct HexError {
    /// The offending digit pair.
    pub digits: [char; 2],
    /// The character offset of the pair within its row.
    pub position: usize,
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [high, low] = self.digits;
        write!(
            f,
            "invalid hex digits \"{}{}\" at offset {}",
            high.escape_debug(),
            low.escape_debug(),
            self.position
        )
    }
}

impl error::Error for HexError {}
