//! Sheet compositor.
//!
//! Stacks frames top to bottom at x = 0. The sheet is as wide as the widest
//! frame and as tall as the sum of every frame's height plus `margin`, with
//! the margin also added after the last frame.
//!
//! If any frame is indexed the whole sheet is indexed and uses the palette
//! of the first indexed frame. Background and mask values depend on the
//! colour model:
//!
//! | model    | background         | masked pixel      |
//! |----------|--------------------|-------------------|
//! | indexed  | last palette index | index 0           |
//! | direct   | opaque white       | fully transparent |
//!
//! A mask pixel with alpha 0 lets the frame through; anything else masks it.

use crate::error::{Result, SplatterError};
use crate::types::{Canvas, Colour, Palette, PixelData, Raster, SourceImage};

/// Palette index written where the mask hides an indexed frame.
pub const MASKED_INDEX: u8 = 0;

/// Colour model of a sheet, chosen once per composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel<'a> {
    Indexed(&'a Palette),
    Direct,
}

impl<'a> ColorModel<'a> {
    /// Indexed with the first palette found, otherwise direct.
    pub fn detect(images: &'a [SourceImage]) -> Self {
        images
            .iter()
            .find_map(|img| img.palette())
            .map_or(ColorModel::Direct, ColorModel::Indexed)
    }
}

/// Canvas size for a stack of frames: (max width, sum of height + margin).
///
/// Fails when the stacked height does not fit in a `u32`.
pub fn sheet_size(images: &[SourceImage], margin: u32) -> Result<(u32, u32)> {
    let width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let height = images.iter().try_fold(0u32, |total, img| {
        total
            .checked_add(img.height())
            .and_then(|h| h.checked_add(margin))
            .ok_or_else(|| height_overflow(images.len(), margin))
    })?;
    Ok((width, height))
}

/// Top edge of each frame in the sheet.
pub fn row_offsets(images: &[SourceImage], margin: u32) -> Result<Vec<u32>> {
    let mut offsets = Vec::with_capacity(images.len());
    let mut y = 0u32;
    for img in images {
        offsets.push(y);
        y = y
            .checked_add(img.height())
            .and_then(|h| h.checked_add(margin))
            .ok_or_else(|| height_overflow(images.len(), margin))?;
    }
    Ok(offsets)
}

fn height_overflow(frames: usize, margin: u32) -> SplatterError {
    SplatterError::Compose {
        message: format!(
            "Sheet height overflows: {} frames with a {}px margin exceed {} pixels",
            frames,
            margin,
            u32::MAX
        ),
        help: Some("Use a smaller margin or split the frames across sheets".to_string()),
    }
}

/// Compose frames into one sheet.
///
/// An empty frame list gives a 0x0 direct canvas. Fails when a direct-colour
/// frame appears in a sheet that another frame made indexed.
pub fn compose(images: &[SourceImage], mask: Option<&SourceImage>, margin: u32) -> Result<Canvas> {
    let (width, height) = sheet_size(images, margin)?;
    let offsets = row_offsets(images, margin)?;

    match ColorModel::detect(images) {
        ColorModel::Indexed(palette) => {
            compose_indexed(images, &offsets, mask, palette, width, height)
        }
        ColorModel::Direct => Ok(compose_direct(images, &offsets, mask, width, height)),
    }
}

fn compose_indexed(
    images: &[SourceImage],
    offsets: &[u32],
    mask: Option<&SourceImage>,
    palette: &Palette,
    width: u32,
    height: u32,
) -> Result<Canvas> {
    let mut canvas = Raster::filled_indexed(width, height, palette.clone(), palette.last_index());

    for (frame, (img, &top)) in images.iter().zip(offsets).enumerate() {
        let PixelData::Indexed { indices, .. } = img.data() else {
            return Err(SplatterError::Compose {
                message: format!(
                    "Frame {} is direct colour but the sheet is indexed",
                    frame + 1
                ),
                help: Some(
                    "Save every frame of a sheet with the same colour model".to_string(),
                ),
            });
        };

        let w = img.width();
        for y in 0..img.height() {
            for x in 0..w {
                let index = indices[(y * w + x) as usize];
                let value = match mask {
                    Some(mask) if mask.hides_at(x, top + y) => MASKED_INDEX,
                    _ => index,
                };
                canvas.set_index(x, top + y, value);
            }
        }
    }

    Ok(canvas)
}

fn compose_direct(
    images: &[SourceImage],
    offsets: &[u32],
    mask: Option<&SourceImage>,
    width: u32,
    height: u32,
) -> Canvas {
    let mut canvas = Raster::filled_direct(width, height, Colour::WHITE);

    for (img, &top) in images.iter().zip(offsets) {
        match (img.data(), mask) {
            (PixelData::Direct(pixels), None) => {
                canvas.blit_rows(pixels, img.width(), top);
            }
            _ => {
                for y in 0..img.height() {
                    for x in 0..img.width() {
                        let colour = match mask {
                            Some(mask) if mask.hides_at(x, top + y) => Colour::TRANSPARENT,
                            _ => img.colour_at(x, y).unwrap_or(Colour::TRANSPARENT),
                        };
                        canvas.set_colour(x, top + y, colour);
                    }
                }
            }
        }
    }

    canvas
}
