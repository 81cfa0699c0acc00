//! Defines the in-memory layout of GFX-style bitmap fonts: the glyph records gathered from a
//! source font, the flat bitmap they are packed into and the metadata that indexes it.
#![no_std]

extern crate alloc;

pub mod bitmap;
pub mod glyph;
pub mod layout;

/// Converts a `u32` into a `usize`, saturating on targets where `usize` is narrower.
fn u32_to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
