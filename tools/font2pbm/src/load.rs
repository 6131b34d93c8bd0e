//! Reading raw font data from a byte stream.

use core::{error, fmt};
use std::io::{self, Read};

/// The size of the load address that precedes the data of a Commodore program file.
pub const LOAD_ADDRESS_SIZE: u64 = 2;

/// The kind of file the font data is read from.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum InputKind {
    /// A program file whose data is preceded by a load address.
    #[default]
    Program,
    /// A ROM image containing only font data.
    Rom,
}

impl InputKind {
    /// Returns the number of bytes that precede the font data.
    pub const fn prefix_len(self) -> u64 {
        match self {
            Self::Program => LOAD_ADDRESS_SIZE,
            Self::Rom => 0,
        }
    }
}

/// Discards up to `skip` bytes from `reader` and then reads exactly `byte_count` bytes.
///
/// A stream that ends inside the skipped prefix is only an error if `byte_count` is not zero.
///
/// # Errors
///
/// - [`LoadError::Io`]: if reading from `reader` fails.
/// - [`LoadError::Truncated`]: if fewer than `byte_count` bytes follow the prefix.
/// - [`LoadError::OutOfMemory`]: if the buffer cannot be allocated.
pub fn read_font<R: Read>(
    mut reader: R,
    byte_count: usize,
    skip: u64,
) -> Result<Vec<u8>, LoadError> {
    io::copy(&mut reader.by_ref().take(skip), &mut io::sink())?;

    let limit = u64::try_from(byte_count).map_err(|_| LoadError::OutOfMemory)?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(byte_count)
        .map_err(|_| LoadError::OutOfMemory)?;
    reader.take(limit).read_to_end(&mut buffer)?;

    if buffer.len() != byte_count {
        return Err(LoadError::Truncated {
            actual_size: buffer.len(),
            expected_size: byte_count,
        });
    }

    Ok(buffer)
}

/// Errors that can occur while reading font data.
#[derive(Debug)]
pub enum LoadError {
    /// The underlying stream failed.
    Io(io::Error),
    /// The stream ended before the font data was complete.
    Truncated {
        /// The number of font bytes that were available.
        actual_size: usize,
        /// The number of font bytes required.
        expected_size: usize,
    },
    /// The font buffer could not be allocated.
    OutOfMemory,
}

impl From<io::Error> for LoadError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "read failed: {error}"),
            Self::Truncated {
                actual_size,
                expected_size,
            } => write!(
                f,
                "data is truncated: expected {expected_size} bytes but got {actual_size} bytes"
            ),
            Self::OutOfMemory => f.write_str("Out of memory"),
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            _ => None,
        }
    }
}
