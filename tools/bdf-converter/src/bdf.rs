//! Line-oriented scanning of BDF font sources.
//!
//! Both scans are permissive by default: absent or unparseable fields fall back to defaults and
//! glyph blocks without a usable encoding are dropped. With `strict` set, the first such defect is
//! reported as a [`ValidationError`] instead.

use core::{error, fmt, str::FromStr};

use gfx_font::{
    bitmap::row_bytes,
    glyph::{CodeRange, GlyphCollection, GlyphMetrics, GlyphRecord, Insertion},
    layout::FontHeader,
};

/// Scans `lines` for the font family and pixel size.
///
/// The family is the third `-`-separated segment of the first `FONT ` line; the pixel size is the
/// value of the first `PIXEL_SIZE ` line.
///
/// # Errors
///
/// Returns [`ValidationErrorKind::InvalidNumber`] if `strict` is set and the pixel size is not a
/// valid number.
pub fn parse_header(lines: &[&str], strict: bool) -> Result<FontHeader, ValidationError> {
    let mut family_name = None;
    let mut pixel_size = None;

    for (index, line) in lines.iter().enumerate() {
        if family_name.is_none() && line.starts_with("FONT ") {
            family_name = Some(
                line.split('-')
                    .nth(2)
                    .map(|segment| segment.replace(' ', ""))
                    .unwrap_or_else(|| FontHeader::DEFAULT_FAMILY_NAME.into()),
            );
        } else if pixel_size.is_none() && line.starts_with("PIXEL_SIZE ") {
            let context = Context {
                line: index + 1,
                glyph: None,
                strict,
            };
            pixel_size = Some(
                context
                    .parse_field("PIXEL_SIZE", line, 1)?
                    .unwrap_or(FontHeader::DEFAULT_PIXEL_SIZE),
            );
        }
    }

    let header = FontHeader::new(
        family_name
            .as_deref()
            .unwrap_or(FontHeader::DEFAULT_FAMILY_NAME),
        pixel_size.unwrap_or(FontHeader::DEFAULT_PIXEL_SIZE),
    );
    log::debug!(
        "font family {:?}, pixel size {}",
        header.family_name(),
        header.pixel_size()
    );

    Ok(header)
}

/// Scans `lines` for glyph blocks, collecting those whose encoding lies in `range`.
///
/// # Errors
///
/// Only returns errors if `strict` is set; see [`ValidationErrorKind`] for the defects reported.
pub fn parse_glyphs(
    lines: &[&str],
    range: CodeRange,
    strict: bool,
) -> Result<GlyphCollection, ValidationError> {
    let mut glyphs = GlyphCollection::new(range);

    let mut index = 0;
    while index < lines.len() {
        if lines[index].trim().starts_with("STARTCHAR") {
            let (block, end) = scan_glyph(lines, index, strict)?;
            index = end;

            if let Some(glyph) = block.finish(strict)? {
                let code = glyph.code();
                match glyphs.insert(glyph) {
                    Insertion::Inserted => log::debug!("collected glyph {code}"),
                    Insertion::Replaced(_) if strict => {
                        return Err(block.error(ValidationErrorKind::DuplicateCode(code)));
                    }
                    Insertion::Replaced(_) => {
                        log::warn!("glyph {code} redefined at line {}", block.line);
                    }
                    Insertion::OutOfRange(_) => log::trace!("skipped glyph {code}"),
                }
            }
        }

        index += 1;
    }

    Ok(glyphs)
}

/// Scans the glyph block whose `STARTCHAR` line is at `start`.
///
/// Returns the block and the index of its `ENDCHAR` line, or `lines.len()` if the block is not
/// terminated.
fn scan_glyph<'source>(
    lines: &[&'source str],
    start: usize,
    strict: bool,
) -> Result<(GlyphBlock<'source>, usize), ValidationError> {
    let name = lines[start].trim()["STARTCHAR".len()..].trim();
    let mut block = GlyphBlock::new(name, start + 1);

    let mut index = start + 1;
    while index < lines.len() {
        let line = lines[index].trim();
        if line.starts_with("ENDCHAR") {
            block.terminated = true;
            break;
        }
        if strict && line.starts_with("STARTCHAR") {
            return Err(block.error(ValidationErrorKind::Unterminated));
        }

        let context = block.context(index, strict);
        if line.starts_with("ENCODING ") {
            block.code = context.parse_field("ENCODING", line, 1)?;
        } else if line.starts_with("DWIDTH ") {
            block.advance = context.parse_field("DWIDTH", line, 1)?;
        } else if line.starts_with("BBX ") {
            block.has_bbx = true;
            block.width = context.parse_field("BBX", line, 1)?;
            block.height = context.parse_field("BBX", line, 2)?;
            block.x_offset = context.parse_field("BBX", line, 3)?;
            block.y_offset = context.parse_field("BBX", line, 4)?;
        } else if line.starts_with("BITMAP") {
            index += 1;
            while index < lines.len() {
                let row = lines[index].trim();
                if row.starts_with("ENDCHAR") {
                    block.terminated = true;
                    break;
                }
                if strict && row.starts_with("STARTCHAR") {
                    return Err(block.error(ValidationErrorKind::Unterminated));
                }

                if !row.is_empty() {
                    block.rows.push((index + 1, row));
                }
                index += 1;
            }
            break;
        }

        index += 1;
    }

    if strict && !block.terminated {
        return Err(block.error(ValidationErrorKind::Unterminated));
    }

    Ok((block, index))
}

/// The fields collected from a single glyph block.
#[derive(Clone, Debug, Default)]
struct GlyphBlock<'source> {
    /// The name given on the `STARTCHAR` line.
    name: &'source str,
    /// The 1-based line number of the `STARTCHAR` line.
    line: usize,
    /// The `ENCODING` value.
    code: Option<i32>,
    /// The `DWIDTH` value.
    advance: Option<i32>,
    /// Whether a `BBX` line was seen.
    has_bbx: bool,
    /// The `BBX` width.
    width: Option<u32>,
    /// The `BBX` height.
    height: Option<u32>,
    /// The `BBX` horizontal offset.
    x_offset: Option<i32>,
    /// The `BBX` vertical offset.
    y_offset: Option<i32>,
    /// The bitmap rows with their 1-based line numbers.
    rows: Vec<(usize, &'source str)>,
    /// Whether the block was closed by `ENDCHAR`.
    terminated: bool,
}

impl<'source> GlyphBlock<'source> {
    /// Creates an empty [`GlyphBlock`] named `name` starting at the 1-based `line`.
    fn new(name: &'source str, line: usize) -> Self {
        Self {
            name,
            line,
            ..Self::default()
        }
    }

    /// Returns the [`Context`] for parsing the line at `index` of this block.
    fn context(&self, index: usize, strict: bool) -> Context<'source> {
        Context {
            line: index + 1,
            glyph: Some(self.name),
            strict,
        }
    }

    /// Creates a [`ValidationError`] of `kind` located at this block's `STARTCHAR` line.
    fn error(&self, kind: ValidationErrorKind) -> ValidationError {
        ValidationError {
            line: self.line,
            glyph: Some(self.name.into()),
            kind,
        }
    }

    /// Converts the block into a [`GlyphRecord`], or `None` if it has no encoding.
    fn finish(&self, strict: bool) -> Result<Option<GlyphRecord>, ValidationError> {
        if strict {
            self.validate()?;
        }

        let Some(code) = self.code else {
            log::debug!("dropping glyph {:?} without encoding", self.name);
            return Ok(None);
        };

        let metrics = GlyphMetrics {
            width: self.width.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
            x_offset: self.x_offset.unwrap_or_default(),
            y_offset: self.y_offset.unwrap_or_default(),
            advance: self.advance.unwrap_or_default(),
        };
        let rows = self.rows.iter().map(|&(_, row)| row.into()).collect();

        Ok(Some(GlyphRecord::new(code, metrics, rows)))
    }

    /// Checks the block for the defects reported in strict mode.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.code.is_none() {
            return Err(self.error(ValidationErrorKind::MissingEncoding));
        }
        if !self.has_bbx {
            return Err(self.error(ValidationErrorKind::MissingBoundingBox));
        }

        let metrics = GlyphMetrics {
            width: self.width.unwrap_or_default(),
            ..GlyphMetrics::default()
        };
        let height = self.height.unwrap_or_default();
        if u32::try_from(self.rows.len()).ok() != Some(height) {
            return Err(self.error(ValidationErrorKind::RowCount {
                expected: height,
                actual: self.rows.len(),
            }));
        }

        let expected = metrics.row_stride() * 2;
        for &(line, row) in &self.rows {
            let error = |kind| ValidationError {
                line,
                glyph: Some(self.name.into()),
                kind,
            };

            let actual = row.chars().count();
            if actual != expected {
                return Err(error(ValidationErrorKind::RowLength { expected, actual }));
            }
            if let Some(Err(hex_error)) = row_bytes(row).find(Result::is_err) {
                return Err(error(ValidationErrorKind::InvalidHex(hex_error.to_string())));
            }
        }

        Ok(())
    }
}

/// Where a field is parsed, for diagnostics.
#[derive(Clone, Copy, Debug)]
struct Context<'source> {
    /// The 1-based line number.
    line: usize,
    /// The enclosing glyph's name, if any.
    glyph: Option<&'source str>,
    /// Whether defects are reported rather than defaulted.
    strict: bool,
}

impl Context<'_> {
    /// Parses the whitespace-separated token at `position` of `line` as the value of `field`.
    ///
    /// An absent or unparseable token yields `None` unless the context is strict.
    fn parse_field<T: FromStr>(
        &self,
        field: &'static str,
        line: &str,
        position: usize,
    ) -> Result<Option<T>, ValidationError> {
        let token = line.split_whitespace().nth(position).unwrap_or_default();
        if let Ok(value) = token.parse() {
            return Ok(Some(value));
        }

        let kind = ValidationErrorKind::InvalidNumber {
            field,
            value: token.into(),
        };
        if self.strict {
            return Err(ValidationError {
                line: self.line,
                glyph: self.glyph.map(Into::into),
                kind,
            });
        }

        log::warn!("line {}: {kind}, using default", self.line);
        Ok(None)
    }
}

/// A defect found while scanning a BDF source in strict mode.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ValidationError {
    /// The 1-based line number the defect was found at.
    pub line: usize,
    /// The name of the glyph the defect belongs to, if any.
    pub glyph: Option<String>,
    /// The kind of defect.
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.glyph {
            Some(glyph) => write!(f, "line {} (glyph {glyph:?}): {}", self.line, self.kind),
            None => write!(f, "line {}: {}", self.line, self.kind),
        }
    }
}

impl error::Error for ValidationError {}

/// The defects reported in strict mode.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A numeric field is absent or not a valid number.
    InvalidNumber {
        /// The keyword of the field.
        field: &'static str,
        /// The offending token.
        value: String,
    },
    /// A glyph block has no `ENCODING` line.
    MissingEncoding,
    /// A glyph block has no `BBX` line.
    MissingBoundingBox,
    /// A glyph block is not closed by `ENDCHAR`.
    Unterminated,
    /// A glyph's row count differs from its bounding box height.
    RowCount {
        /// The bounding box height.
        expected: u32,
        /// The number of rows present.
        actual: usize,
    },
    /// A row's digit count does not match the bounding box width.
    RowLength {
        /// The digit count implied by the bounding box width.
        expected: usize,
        /// The digit count present.
        actual: usize,
    },
    /// A row contains digits that are not hexadecimal.
    InvalidHex(String),
    /// Two glyphs share a character code.
    DuplicateCode(i32),
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value } if value.is_empty() => {
                write!(f, "missing {field} value")
            }
            Self::InvalidNumber { field, value } => write!(f, "invalid {field} value {value:?}"),
            Self::MissingEncoding => write!(f, "glyph has no ENCODING"),
            Self::MissingBoundingBox => write!(f, "glyph has no BBX"),
            Self::Unterminated => write!(f, "glyph is not terminated by ENDCHAR"),
            Self::RowCount { expected, actual } => {
                write!(f, "expected {expected} bitmap rows but got {actual}")
            }
            Self::RowLength { expected, actual } => {
                write!(f, "expected {expected} hex digits per row but got {actual}")
            }
            Self::InvalidHex(error) => write!(f, "{error}"),
            Self::DuplicateCode(code) => write!(f, "character code {code} is defined twice"),
        }
    }
}
