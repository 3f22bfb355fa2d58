//! Core domain types for splatter.
//!
//! - `Colour` - RGBA colour values
//! - `Palette` - colour table of an indexed image
//! - `Raster` - decoded frames, masks and composed sheets
//! - `SheetRule` - prefix/suffix patterns that group frames into sheets

mod colour;
mod palette;
mod raster;
mod rule;

pub use colour::Colour;
pub use palette::{Palette, MAX_PALETTE_ENTRIES};
pub use raster::{Canvas, PixelData, Raster, SourceImage};
pub use rule::{group_key, SheetRule, SheetRuleSet};
