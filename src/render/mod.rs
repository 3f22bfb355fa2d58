//! Rendering module for splatter.
//!
//! Composes frames into sheets and moves rasters in and out of PNG.

mod codec;
mod compose;
mod sheet;

pub use codec::{decode_png, encode_png, read_png, write_png};
pub use compose::{compose, row_offsets, sheet_size, ColorModel, MASKED_INDEX};
pub use sheet::{write_sheet_json, Frame, SheetMeta};
