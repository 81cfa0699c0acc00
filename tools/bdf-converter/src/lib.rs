//! Tool for converting BDF bitmap fonts into GFX font source declarations: a packed bitmap array,
//! a glyph metadata table and a font descriptor.

use core::{error, fmt};
use std::io::{self, Write};

use gfx_font::{bitmap::pack_bitmaps, glyph::CodeRange, layout::FontLayout};

use crate::bdf::ValidationError;

pub mod bdf;
pub mod cli;
pub mod emit;

/// Options controlling a conversion.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ConvertOptions {
    /// The character codes to convert.
    pub range: CodeRange,
    /// Whether malformed input is rejected instead of defaulted.
    pub strict: bool,
}

/// Parses `font` as a BDF file and writes the GFX declarations of the glyphs selected by
/// `options` to `writer`.
///
/// Nothing is written unless the whole font was parsed successfully.
///
/// # Errors
///
/// - [`ConvertError::Validation`]: Returned if `options.strict` is set and `font` is malformed.
/// - [`ConvertError::Io`]: Returned if writing to `writer` fails.
pub fn convert_bdf<W: Write>(
    font: &[u8],
    options: &ConvertOptions,
    writer: W,
) -> Result<FontLayout, ConvertError> {
    let source = String::from_utf8_lossy(font);
    let lines = source.lines().collect::<Vec<_>>();

    let header = bdf::parse_header(&lines, options.strict)?;
    let glyphs = bdf::parse_glyphs(&lines, options.range, options.strict)?;
    if glyphs.is_empty() {
        let range = glyphs.range();
        log::warn!("no glyphs in range {}..={}", range.first(), range.last());
    }

    let bitmaps = pack_bitmaps(&glyphs);
    let layout = FontLayout::new(&header, &glyphs, bitmaps);
    emit::emit_font(&layout, writer)?;

    Ok(layout)
}

/// Various errors that can occur while converting a font.
#[derive(Debug)]
pub enum ConvertError {
    /// The font is malformed.
    Validation(ValidationError),
    /// An error occurred while writing the output.
    Io(io::Error),
}

impl From<ValidationError> for ConvertError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<io::Error> for ConvertError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(error) => write!(f, "malformed font: {error}"),
            Self::Io(error) => write!(f, "error writing output: {error}"),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Validation(error) => Some(error),
            Self::Io(error) => Some(error),
        }
    }
}
