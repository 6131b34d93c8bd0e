//! Defines the Commodore 64 font structures and the layout engine that arranges them into a
//! packed bitmap.
//!
//! The layout engine only requires `alloc`; the PBM emitter requires the `std` feature.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod glyph;
#[cfg(feature = "std")]
pub mod pbm;
pub mod raster;
pub mod scale;
