//! Binary Portable Bitmap (`P4`) output for a [`Raster`].

use std::io::{self, Write};

use crate::raster::Raster;

/// The comment line written into every PBM header.
pub const PBM_COMMENT: &str = "# Commodore 64 font converted by font2pbm";

/// Writes `raster` to `writer` as a binary PBM image: the `P4` header, a comment line and the
/// dimensions, followed by the packed pixel rows.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_pbm<W: Write>(raster: &Raster, mut writer: W) -> io::Result<()> {
    write!(
        writer,
        "P4\n{PBM_COMMENT}\n{} {}\n",
        raster.width(),
        raster.height()
    )?;
    writer.write_all(raster.as_bytes())?;
    writer.flush()
}
