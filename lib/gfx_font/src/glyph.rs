//! Glyph records and the code-keyed collection they are gathered into.

use alloc::{
    collections::btree_map::{self, BTreeMap},
    string::String,
    vec::Vec,
};

use crate::u32_to_usize;

/// An inclusive range of character codes.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CodeRange {
    /// The first character code in the range.
    first: i32,
    /// The last character code in the range.
    last: i32,
}

impl CodeRange {
    /// The first character code selected when no range is given.
    pub const DEFAULT_FIRST: i32 = 32;
    /// The last character code selected when no range is given.
    pub const DEFAULT_LAST: i32 = 255;

    /// Creates a new [`CodeRange`] spanning `first..=last`.
    ///
    /// Returns `None` if `first` is greater than `last`.
    pub const fn new(first: i32, last: i32) -> Option<Self> {
        if first > last {
            return None;
        }

        Some(Self { first, last })
    }

    /// Returns the first character code in the range.
    pub const fn first(&self) -> i32 {
        self.first
    }

    /// Returns the last character code in the range.
    pub const fn last(&self) -> i32 {
        self.last
    }

    /// Returns `true` if `code` lies within the range.
    pub const fn contains(&self, code: i32) -> bool {
        self.first <= code && code <= self.last
    }
}

impl Default for CodeRange {
    fn default() -> Self {
        Self {
            first: Self::DEFAULT_FIRST,
            last: Self::DEFAULT_LAST,
        }
    }
}

/// The metrics of a single glyph.
///
/// Fields that were absent from the source are zero.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// The width of the glyph's bounding box in pixels.
    pub width: u32,
    /// The height of the glyph's bounding box in pixels.
    pub height: u32,
    /// The horizontal offset of the bounding box from the glyph origin.
    pub x_offset: i32,
    /// The vertical offset of the bounding box from the glyph origin.
    pub y_offset: i32,
    /// The distance the cursor advances after the glyph is drawn.
    pub advance: i32,
}

impl GlyphMetrics {
    /// Returns the number of bytes a single row of the glyph occupies.
    pub fn row_stride(&self) -> usize {
        u32_to_usize(self.width.div_ceil(8))
    }
}

/// The metrics and raw bitmap rows of the glyph for one character code.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GlyphRecord {
    /// The character code of the glyph.
    code: i32,
    /// The metrics of the glyph.
    metrics: GlyphMetrics,
    /// The hexadecimal bitmap rows, top to bottom.
    rows: Vec<String>,
}

impl GlyphRecord {
    /// Creates a new [`GlyphRecord`].
    pub const fn new(code: i32, metrics: GlyphMetrics, rows: Vec<String>) -> Self {
        Self {
            code,
            metrics,
            rows,
        }
    }

    /// Returns the character code of the glyph.
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Returns the [`GlyphMetrics`] of the glyph.
    pub const fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    /// Returns the hexadecimal bitmap rows of the glyph.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Returns the number of bytes the glyph occupies in a packed bitmap, as derived from its
    /// row count and width.
    pub fn bitmap_size(&self) -> usize {
        self.rows.len() * self.metrics.row_stride()
    }
}

/// The result of [`GlyphCollection::insert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// The glyph was inserted.
    Inserted,
    /// The glyph was inserted and replaced a glyph with the same character code.
    Replaced(GlyphRecord),
    /// The glyph's character code lies outside the collection's [`CodeRange`] and it was
    /// discarded.
    OutOfRange(GlyphRecord),
}

/// A set of [`GlyphRecord`]s keyed by character code, restricted to a [`CodeRange`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphCollection {
    /// The range every contained character code lies in.
    range: CodeRange,
    /// The glyphs, keyed by character code.
    glyphs: BTreeMap<i32, GlyphRecord>,
}

impl GlyphCollection {
    /// Creates an empty [`GlyphCollection`] accepting codes in `range`.
    pub const fn new(range: CodeRange) -> Self {
        Self {
            range,
            glyphs: BTreeMap::new(),
        }
    }

    /// Returns the [`CodeRange`] of the collection.
    pub const fn range(&self) -> CodeRange {
        self.range
    }

    /// Inserts `glyph` if its character code lies in the collection's range.
    pub fn insert(&mut self, glyph: GlyphRecord) -> Insertion {
        if !self.range.contains(glyph.code) {
            return Insertion::OutOfRange(glyph);
        }

        match self.glyphs.insert(glyph.code, glyph) {
            Some(previous) => Insertion::Replaced(previous),
            None => Insertion::Inserted,
        }
    }

    /// Returns the glyph for `code`, if present.
    pub fn get(&self, code: i32) -> Option<&GlyphRecord> {
        self.glyphs.get(&code)
    }

    /// Returns the number of glyphs in the collection.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if the collection holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the lowest character code present.
    pub fn first_code(&self) -> Option<i32> {
        self.glyphs.keys().next().copied()
    }

    /// Returns the highest character code present.
    pub fn last_code(&self) -> Option<i32> {
        self.glyphs.keys().next_back().copied()
    }

    /// Returns an [`Iterator`] over the glyphs in ascending character code order.
    pub fn iter(&self) -> btree_map::Values<'_, i32, GlyphRecord> {
        self.glyphs.values()
    }
}

impl<'collection> IntoIterator for &'collection GlyphCollection {
    type Item = &'collection GlyphRecord;
    type IntoIter = btree_map::Values<'collection, i32, GlyphRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
