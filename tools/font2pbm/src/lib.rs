//! Tool for converting a Commodore 64 bitmap font into a Portable Bitmap (PBM) image.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
};

use anyhow::{Context, Result};
use font::{
    glyph::GlyphSet,
    pbm::write_pbm,
    raster::{LayoutError, layout, placed_chars},
};

use crate::{
    cli::Config,
    load::{LoadError, read_font},
};

pub mod cli;
pub mod load;

/// Converts the font described by `config`, reading it from the configured file or standard
/// input, and writes the PBM image to `writer`.
///
/// # Errors
///
/// Returns [`Err`] if the input cannot be opened or any stage of [`convert`] fails.
pub fn run<W: Write>(config: &Config, writer: W) -> Result<()> {
    match &config.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Can't open \"{}\"", path.display()))?;
            convert(config, BufReader::new(file), writer)
        }
        None => convert(config, io::stdin().lock(), writer),
    }
}

/// Reads the font described by `config` from `reader`, lays it out and writes the resulting PBM
/// image to `writer`.
///
/// Nothing is written to `writer` unless the font was read and laid out successfully.
///
/// # Errors
///
/// Returns [`Err`] if the input is too short, memory cannot be allocated or writing fails.
pub fn convert<R: Read, W: Write>(config: &Config, reader: R, writer: W) -> Result<()> {
    let byte_count =
        GlyphSet::required_len(config.scale, config.char_count).ok_or(LayoutError::TooLarge)?;

    let data = read_font(reader, byte_count, config.kind.prefix_len()).map_err(|error| {
        match error {
            LoadError::OutOfMemory => anyhow::Error::new(error),
            error => anyhow::Error::new(error)
                .context(format!("Invalid input from \"{}\"", config.input_name())),
        }
    })?;
    tracing::debug!(bytes = data.len(), input = %config.input_name(), "read font data");

    let glyphs = GlyphSet::new(&data, config.scale, config.char_count)?;
    let raster = layout(&glyphs)?;

    let placed = placed_chars(config.scale, config.char_count);
    if placed != config.char_count {
        tracing::debug!(
            placed,
            omitted = config.char_count - placed,
            "characters of an incomplete line are omitted"
        );
    }
    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        scale = %config.scale,
        "laid out font"
    );

    write_pbm(&raster, BufWriter::new(writer)).context("Can't write output")
}
