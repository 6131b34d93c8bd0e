//! The layout engine: arranges a [`GlyphSet`] into a packed 1-bit-per-pixel [`Raster`].

use alloc::{boxed::Box, vec::Vec};
use core::{error, fmt};

use crate::{
    glyph::{CELL_PIXELS, CELL_SIZE, GlyphSet, source_cell_offset},
    scale::Scale,
};

/// The width of every [`Raster`] in pixels.
pub const RASTER_WIDTH: usize = 256;

/// The number of bytes in a single row of a [`Raster`].
pub const ROW_BYTES: usize = RASTER_WIDTH / 8;

/// Returns the number of logical characters that fit in one line of a [`Raster`] at `scale`.
pub const fn chars_per_line(scale: Scale) -> usize {
    ROW_BYTES / scale.width()
}

/// Returns the number of characters of a `char_count` character font that [`layout`] places into
/// the [`Raster`]. Characters of an incomplete last line are not placed.
pub const fn placed_chars(scale: Scale, char_count: usize) -> usize {
    let per_line = chars_per_line(scale);
    (char_count / per_line) * per_line
}

/// Returns the offset of the byte containing pixel (`col`, `row`) in a [`Raster`].
pub const fn dest_byte_offset(row: usize, col: usize) -> usize {
    row * ROW_BYTES + col / 8
}

/// Returns the pixel (`col`, `row`) at which the top-left corner of character `index` is drawn.
const fn char_origin(scale: Scale, index: usize) -> (usize, usize) {
    let per_line = chars_per_line(scale);
    let col = (index % per_line) * CELL_PIXELS * scale.width();
    let row = (index / per_line) * CELL_PIXELS * scale.height();
    (col, row)
}

/// A packed 1-bit-per-pixel bitmap that is [`RASTER_WIDTH`] pixels wide.
///
/// Rows are stored top to bottom, [`ROW_BYTES`] bytes each, with the most significant bit of each
/// byte as the leftmost pixel. A set bit is a foreground (black) pixel.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Raster {
    /// The height of the [`Raster`] in pixels.
    height: usize,
    /// The packed pixel data.
    data: Box<[u8]>,
}

impl Raster {
    /// Returns the width of the [`Raster`] in pixels.
    pub const fn width(&self) -> usize {
        RASTER_WIDTH
    }

    /// Returns the height of the [`Raster`] in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the packed pixel data.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reverses [`layout`], recovering the plane-interleaved font data of `char_count` characters
    /// at `scale`.
    ///
    /// Characters that are not present in the [`Raster`] are returned as blank cells.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::TooLarge`]: if the font size overflows a [`usize`].
    /// - [`LayoutError::OutOfMemory`]: if the font buffer cannot be allocated.
    pub fn glyph_data(&self, scale: Scale, char_count: usize) -> Result<Vec<u8>, LayoutError> {
        let len = GlyphSet::required_len(scale, char_count).ok_or(LayoutError::TooLarge)?;
        let mut font = zeroed(len)?;

        let char_rows = self.height / (CELL_PIXELS * scale.height());
        let present = char_count.min(char_rows.saturating_mul(chars_per_line(scale)));
        for index in 0..present {
            let (col, row) = char_origin(scale, index);
            for xc in 0..scale.width() {
                for yc in 0..scale.height() {
                    let src = dest_byte_offset(row + CELL_PIXELS * yc, col + CELL_PIXELS * xc);
                    let dst = source_cell_offset(scale, char_count, index, xc, yc);
                    for line in 0..CELL_SIZE {
                        font[dst + line] = self.data[src + line * ROW_BYTES];
                    }
                }
            }
        }

        Ok(font)
    }
}

/// Lays out `glyphs` left to right, top to bottom into a new [`Raster`].
///
/// The [`Raster`] is [`chars_per_line`] characters wide and as many full lines tall as
/// `glyphs` fills; see [`placed_chars`].
///
/// # Errors
///
/// - [`LayoutError::TooLarge`]: if the size of the [`Raster`] overflows a [`usize`].
/// - [`LayoutError::OutOfMemory`]: if the [`Raster`] cannot be allocated.
pub fn layout(glyphs: &GlyphSet) -> Result<Raster, LayoutError> {
    let scale = glyphs.scale();
    let char_rows = glyphs.char_count() / chars_per_line(scale);

    let height = char_rows
        .checked_mul(CELL_PIXELS * scale.height())
        .ok_or(LayoutError::TooLarge)?;
    let len = height
        .checked_mul(ROW_BYTES)
        .ok_or(LayoutError::TooLarge)?;
    let mut data = zeroed(len)?;

    for index in 0..placed_chars(scale, glyphs.char_count()) {
        let (col, row) = char_origin(scale, index);
        for xc in 0..scale.width() {
            for yc in 0..scale.height() {
                let Some(glyph) = glyphs.cell(index, xc, yc) else {
                    unreachable!("cell ({xc}, {yc}) of character {index} is missing");
                };

                let offset = dest_byte_offset(row + CELL_PIXELS * yc, col + CELL_PIXELS * xc);
                for (line, bits) in glyph.into_iter().enumerate() {
                    data[offset + line * ROW_BYTES] = bits.0;
                }
            }
        }
    }

    Ok(Raster {
        height,
        data: data.into_boxed_slice(),
    })
}

/// Allocates a zero-filled buffer of `len` bytes, reporting allocation failure instead of aborting.
fn zeroed(len: usize) -> Result<Vec<u8>, LayoutError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| LayoutError::OutOfMemory)?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Errors that can occur while laying out a [`Raster`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LayoutError {
    /// The size of the buffer is not representable.
    TooLarge,
    /// The buffer could not be allocated.
    OutOfMemory,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge => f.write_str("Out of memory: bitmap size overflows"),
            Self::OutOfMemory => f.write_str("Out of memory"),
        }
    }
}

impl error::Error for LayoutError {}
