//! Decoded rasters: source frames, masks and composed sheets.

use crate::error::{Result, SplatterError};

use super::{Colour, Palette};

/// Pixel storage, tagged by colour model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// One RGBA colour per pixel, row-major.
    Direct(Vec<Colour>),
    /// One palette index per pixel, row-major.
    Indexed { palette: Palette, indices: Vec<u8> },
}

/// A row-major raster in either colour model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: PixelData,
}

/// A decoded input frame or mask.
pub type SourceImage = Raster;

/// A composed sheet.
pub type Canvas = Raster;

impl Raster {
    /// Create a direct-colour raster from row-major pixels.
    pub fn direct(width: u32, height: u32, pixels: Vec<Colour>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            data: PixelData::Direct(pixels),
        })
    }

    /// Create an indexed raster from row-major palette indices.
    pub fn indexed(width: u32, height: u32, palette: Palette, indices: Vec<u8>) -> Result<Self> {
        check_len(width, height, indices.len())?;
        Ok(Self {
            width,
            height,
            data: PixelData::Indexed { palette, indices },
        })
    }

    /// A direct-colour raster with every pixel set to `colour`.
    pub fn filled_direct(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            data: PixelData::Direct(vec![colour; area(width, height)]),
        }
    }

    /// An indexed raster with every pixel set to `index`.
    pub fn filled_indexed(width: u32, height: u32, palette: Palette, index: u8) -> Self {
        Self {
            width,
            height,
            data: PixelData::Indexed {
                palette,
                indices: vec![index; area(width, height)],
            },
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.data, PixelData::Indexed { .. })
    }

    /// The colour table, for indexed rasters.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.data {
            PixelData::Indexed { palette, .. } => Some(palette),
            PixelData::Direct(_) => None,
        }
    }

    /// Palette index at (x, y). `None` for direct rasters or out of bounds.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        let offset = self.offset(x, y)?;
        match &self.data {
            PixelData::Indexed { indices, .. } => Some(indices[offset]),
            PixelData::Direct(_) => None,
        }
    }

    /// Resolved colour at (x, y), looking indexed pixels up in the palette.
    pub fn colour_at(&self, x: u32, y: u32) -> Option<Colour> {
        let offset = self.offset(x, y)?;
        Some(match &self.data {
            PixelData::Direct(pixels) => pixels[offset],
            PixelData::Indexed { palette, indices } => palette.get(indices[offset]),
        })
    }

    /// Whether this raster, used as a mask, hides the pixel at (x, y).
    ///
    /// Any non-zero alpha hides. Coordinates outside the raster never do.
    pub fn hides_at(&self, x: u32, y: u32) -> bool {
        self.colour_at(x, y).is_some_and(|c| !c.is_transparent())
    }

    pub(crate) fn set_index(&mut self, x: u32, y: u32, index: u8) {
        if let Some(offset) = self.offset(x, y) {
            if let PixelData::Indexed { indices, .. } = &mut self.data {
                indices[offset] = index;
            }
        }
    }

    pub(crate) fn set_colour(&mut self, x: u32, y: u32, colour: Colour) {
        if let Some(offset) = self.offset(x, y) {
            if let PixelData::Direct(pixels) = &mut self.data {
                pixels[offset] = colour;
            }
        }
    }

    /// Copy every row of a direct `src` into this direct raster with its top-left at (0, `top`).
    ///
    /// Rows and columns that fall outside this raster are clipped.
    pub(crate) fn blit_rows(&mut self, src: &[Colour], src_width: u32, top: u32) {
        let PixelData::Direct(pixels) = &mut self.data else {
            return;
        };
        let dst_width = self.width as usize;
        let copy_width = (src_width as usize).min(dst_width);
        if copy_width == 0 {
            return;
        }

        for (row, line) in src.chunks_exact(src_width as usize).enumerate() {
            let y = top as usize + row;
            if y >= self.height as usize {
                break;
            }
            let start = y * dst_width;
            pixels[start..start + copy_width].copy_from_slice(&line[..copy_width]);
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn check_len(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = area(width, height);
    if len != expected {
        return Err(SplatterError::Compose {
            message: format!(
                "{}x{} raster needs {} pixels, got {}",
                width, height, expected, len
            ),
            help: None,
        });
    }
    Ok(())
}
