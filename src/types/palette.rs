//! Colour table for indexed images.

use crate::error::{Result, SplatterError};

use super::Colour;

/// Largest palette an 8-bit index can address.
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// An ordered colour table shared by every pixel of an indexed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Colour>,
}

impl Palette {
    /// Create a palette from its entries.
    ///
    /// Fails when the table is empty or holds more than 256 entries.
    pub fn new(entries: Vec<Colour>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SplatterError::Compose {
                message: "Palette has no entries".to_string(),
                help: None,
            });
        }
        if entries.len() > MAX_PALETTE_ENTRIES {
            return Err(SplatterError::Compose {
                message: format!(
                    "Palette has {} entries, at most {} are allowed",
                    entries.len(),
                    MAX_PALETTE_ENTRIES
                ),
                help: None,
            });
        }
        Ok(Self { entries })
    }

    /// Build a palette from PNG `PLTE` (RGB triples) and optional `tRNS` (alpha per entry).
    pub fn from_png_chunks(plte: &[u8], trns: Option<&[u8]>) -> Result<Self> {
        let entries = plte
            .chunks_exact(3)
            .enumerate()
            .map(|(i, rgb)| {
                let a = trns.and_then(|t| t.get(i)).copied().unwrap_or(255);
                Colour::new(rgb[0], rgb[1], rgb[2], a)
            })
            .collect();
        Self::new(entries)
    }

    /// Split the palette into PNG `PLTE` and `tRNS` chunk payloads.
    ///
    /// `tRNS` is omitted when every entry is opaque, and otherwise trimmed
    /// after the last non-opaque entry.
    pub fn to_png_chunks(&self) -> (Vec<u8>, Option<Vec<u8>>) {
        let plte = self
            .entries
            .iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .collect();

        let trns = self
            .entries
            .iter()
            .rposition(|c| !c.is_opaque())
            .map(|last| self.entries[..=last].iter().map(|c| c.a).collect());

        (plte, trns)
    }

    /// Colour at `index`. Indices past the end read as opaque black.
    pub fn get(&self, index: u8) -> Colour {
        self.entries
            .get(index as usize)
            .copied()
            .unwrap_or(Colour::BLACK)
    }

    /// The highest index in the table, used as the background of indexed sheets.
    pub fn last_index(&self) -> u8 {
        // new() guarantees 1..=256 entries
        (self.entries.len() - 1) as u8
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
