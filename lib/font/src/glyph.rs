//! Interface for interacting with Commodore 64 glyph cells.
//!
//! A C64 font stores each 8x8 cell as eight consecutive bytes, one per scan line, with the most
//! significant bit as the leftmost pixel. Characters larger than one cell are stored as planes: all
//! characters' cells for one sub-position come before any cell of the next sub-position.

use core::{error, fmt};

use crate::scale::Scale;

/// The number of bytes in a single glyph cell.
pub const CELL_SIZE: usize = 8;

/// The width and height of a glyph cell in pixels.
pub const CELL_PIXELS: usize = 8;

/// Returns the byte offset of the cell at sub-position (`xc`, `yc`) of character `index` in a
/// plane-interleaved font of `char_count` characters.
///
/// Sub-positions are ordered column-major across planes: every character's `(0, 0)` cell, then
/// every `(1, 0)` cell, then `(0, 1)`, then `(1, 1)`.
pub const fn source_cell_offset(
    scale: Scale,
    char_count: usize,
    index: usize,
    xc: usize,
    yc: usize,
) -> usize {
    (index + xc * char_count + yc * char_count * scale.width()) * CELL_SIZE
}

/// A plane-interleaved set of glyph cells making up `char_count` logical characters.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphSet<'buffer> {
    /// The buffer that contains the cell data.
    buffer: &'buffer [u8],
    /// The number of cells composing each character.
    scale: Scale,
    /// The number of logical characters in the set.
    char_count: usize,
}

impl<'buffer> GlyphSet<'buffer> {
    /// Returns the number of bytes required to store `char_count` characters at `scale`, or `None`
    /// if the size overflows.
    pub const fn required_len(scale: Scale, char_count: usize) -> Option<usize> {
        match char_count.checked_mul(scale.cells_per_char()) {
            Some(cells) => cells.checked_mul(CELL_SIZE),
            None => None,
        }
    }

    /// Creates a new [`GlyphSet`] over `buffer`.
    ///
    /// # Errors
    ///
    /// - [`GlyphSetError::TooLarge`]: if the size of the set overflows a [`usize`].
    /// - [`GlyphSetError::LengthMismatch`]: if `buffer` is not exactly the size of the set.
    pub fn new(
        buffer: &'buffer [u8],
        scale: Scale,
        char_count: usize,
    ) -> Result<Self, GlyphSetError> {
        let expected_size =
            Self::required_len(scale, char_count).ok_or(GlyphSetError::TooLarge)?;
        if buffer.len() != expected_size {
            return Err(GlyphSetError::LengthMismatch {
                actual_size: buffer.len(),
                expected_size,
            });
        }

        Ok(Self {
            buffer,
            scale,
            char_count,
        })
    }

    /// Returns the [`Scale`] of the characters in this [`GlyphSet`].
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Returns the number of logical characters in this [`GlyphSet`].
    pub const fn char_count(&self) -> usize {
        self.char_count
    }

    /// Returns the raw plane-interleaved bytes.
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.buffer
    }

    /// Returns the [`Glyph`] at sub-position (`xc`, `yc`) of character `index`, or `None` if any
    /// coordinate is out of bounds.
    pub fn cell(&self, index: usize, xc: usize, yc: usize) -> Option<Glyph<'buffer>> {
        if index >= self.char_count || xc >= self.scale.width() || yc >= self.scale.height() {
            return None;
        }

        let offset = source_cell_offset(self.scale, self.char_count, index, xc, yc);
        let buffer = self.buffer.get(offset..)?.first_chunk::<CELL_SIZE>()?;
        Some(Glyph { buffer })
    }
}

/// Errors that can occur when constructing a [`GlyphSet`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GlyphSetError {
    /// The size of the set is not representable.
    TooLarge,
    /// The buffer does not hold exactly the number of bytes the set requires.
    LengthMismatch {
        /// The length of the provided buffer.
        actual_size: usize,
        /// The length the set requires.
        expected_size: usize,
    },
}

impl fmt::Display for GlyphSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge => f.write_str("glyph set size overflows"),
            Self::LengthMismatch {
                actual_size,
                expected_size,
            } => write!(
                f,
                "glyph data length mismatch: expected {expected_size} bytes but got {actual_size} bytes"
            ),
        }
    }
}

impl error::Error for GlyphSetError {}

/// A single 8x8 glyph cell.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The eight scan lines of the cell.
    buffer: &'buffer [u8; CELL_SIZE],
}

impl<'buffer> Glyph<'buffer> {
    /// Returns the scan lines of the [`Glyph`].
    pub const fn as_bytes(&self) -> &'buffer [u8; CELL_SIZE] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            buffer: self.buffer,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The scan lines of the glyph.
    buffer: &'buffer [u8; CELL_SIZE],
    /// The index of the row that will be returned next.
    index: usize,
}

impl Iterator for GlyphRowsIter<'_> {
    type Item = GlyphRow;

    fn next(&mut self) -> Option<Self::Item> {
        let bits = *self.buffer.get(self.index)?;
        self.index += 1;
        Some(GlyphRow(bits))
    }
}

/// A row in the [`Glyph`]. The most significant bit is the leftmost pixel.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow(pub u8);

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{CELL_SIZE, GlyphRow, GlyphSet, GlyphSetError, source_cell_offset};
    use crate::scale::Scale;

    fn scale(token: &str) -> Scale {
        token.parse().unwrap()
    }

    #[test]
    fn single_cell_offsets_are_contiguous() {
        let scale = scale("1x1");
        for index in 0..256 {
            assert_eq!(source_cell_offset(scale, 256, index, 0, 0), index * CELL_SIZE);
        }
    }

    #[test]
    fn double_width_planes() {
        let scale = scale("2x1");
        assert_eq!(source_cell_offset(scale, 64, 0, 0, 0), 0);
        assert_eq!(source_cell_offset(scale, 64, 0, 1, 0), 64 * 8);
        assert_eq!(source_cell_offset(scale, 64, 5, 1, 0), (64 + 5) * 8);
    }

    #[test]
    fn double_height_planes() {
        let scale = scale("1x2");
        assert_eq!(source_cell_offset(scale, 64, 3, 0, 1), (64 + 3) * 8);
    }

    #[test]
    fn quad_planes() {
        let scale = scale("2x2");
        assert_eq!(source_cell_offset(scale, 32, 7, 0, 0), 7 * 8);
        assert_eq!(source_cell_offset(scale, 32, 7, 1, 0), (32 + 7) * 8);
        assert_eq!(source_cell_offset(scale, 32, 7, 0, 1), (64 + 7) * 8);
        assert_eq!(source_cell_offset(scale, 32, 7, 1, 1), (96 + 7) * 8);
    }

    #[test]
    fn new_checks_length() {
        let data = [0u8; 4 * 8 * 2];
        assert!(GlyphSet::new(&data, scale("2x1"), 4).is_ok());
        assert_eq!(
            GlyphSet::new(&data[1..], scale("2x1"), 4),
            Err(GlyphSetError::LengthMismatch {
                actual_size: 63,
                expected_size: 64,
            })
        );
        assert_eq!(
            GlyphSet::new(&data, scale("2x2"), usize::MAX),
            Err(GlyphSetError::TooLarge)
        );
    }

    #[test]
    fn empty_set() {
        let set = GlyphSet::new(&[], scale("2x2"), 0).unwrap();
        assert_eq!(set.char_count(), 0);
        assert!(set.cell(0, 0, 0).is_none());
    }

    #[test]
    fn cell_reads_the_right_plane() {
        let data: Vec<u8> = (0..3 * 4).flat_map(|cell| [cell as u8; CELL_SIZE]).collect();
        let set = GlyphSet::new(&data, scale("2x2"), 3).unwrap();

        assert_eq!(set.cell(2, 0, 0).unwrap().as_bytes(), &[2; CELL_SIZE]);
        assert_eq!(set.cell(2, 1, 0).unwrap().as_bytes(), &[5; CELL_SIZE]);
        assert_eq!(set.cell(2, 0, 1).unwrap().as_bytes(), &[8; CELL_SIZE]);
        assert_eq!(set.cell(2, 1, 1).unwrap().as_bytes(), &[11; CELL_SIZE]);

        assert!(set.cell(3, 0, 0).is_none());
        assert!(set.cell(0, 2, 0).is_none());
        assert!(set.cell(0, 0, 2).is_none());
    }

    #[test]
    fn rows_in_scan_line_order() {
        let data = [0b1000_0001, 0xFF, 0, 0, 0, 0, 0, 0b0101_0101];
        let set = GlyphSet::new(&data, scale("1x1"), 1).unwrap();
        let glyph = set.cell(0, 0, 0).unwrap();

        let rows: Vec<GlyphRow> = glyph.into_iter().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], GlyphRow(0b1000_0001));
        assert_eq!(rows[1], GlyphRow(0xFF));
        assert_eq!(rows[7], GlyphRow(0b0101_0101));
    }
}
