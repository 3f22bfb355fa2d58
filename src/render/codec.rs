//! PNG decode and encode for rasters.
//!
//! Indexed PNGs keep their palette and indices (bit depths below 8 are
//! unpacked to one index per byte). Every other PNG colour type is decoded to
//! RGBA8 through the `image` crate.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, SplatterError};
use crate::types::{Colour, Palette, PixelData, Raster, SourceImage};

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<SourceImage> {
    let bytes = fs::read(path).map_err(|e| SplatterError::Decode {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    decode_png(&bytes).map_err(|message| SplatterError::Decode {
        path: path.to_path_buf(),
        message,
    })
}

/// Encode a raster and write it to `path`.
pub fn write_png(raster: &Raster, path: &Path) -> Result<()> {
    let bytes = encode_png(raster).map_err(|message| SplatterError::Encode {
        path: path.to_path_buf(),
        message,
    })?;

    fs::write(path, bytes).map_err(|e| SplatterError::Encode {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Decode PNG bytes, keeping indexed images indexed.
pub fn decode_png(bytes: &[u8]) -> std::result::Result<SourceImage, String> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;

    let info = reader.info();
    if info.color_type != png::ColorType::Indexed {
        return decode_direct(bytes);
    }

    let plte = info
        .palette
        .as_ref()
        .map(|p| p.to_vec())
        .ok_or_else(|| "Indexed PNG has no PLTE chunk".to_string())?;
    let trns = info.trns.as_ref().map(|t| t.to_vec());
    let bit_depth = info.bit_depth as u8;

    let palette = Palette::from_png_chunks(&plte, trns.as_deref()).map_err(|e| e.to_string())?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    let indices = unpack_indices(&buf, frame.width, frame.height, frame.line_size, bit_depth);

    Raster::indexed(frame.width, frame.height, palette, indices).map_err(|e| e.to_string())
}

fn decode_direct(bytes: &[u8]) -> std::result::Result<SourceImage, String> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| e.to_string())?
        .to_rgba8();

    let (width, height) = img.dimensions();
    let pixels = img.pixels().map(|p| Colour::from_rgba(p.0)).collect();
    Raster::direct(width, height, pixels).map_err(|e| e.to_string())
}

/// Expand packed rows of 1/2/4/8-bit indices to one byte per pixel.
fn unpack_indices(buf: &[u8], width: u32, height: u32, line_size: usize, bit_depth: u8) -> Vec<u8> {
    let width = width as usize;
    let mut indices = Vec::with_capacity(width * height as usize);

    for row in buf.chunks(line_size).take(height as usize) {
        if bit_depth == 8 {
            indices.extend_from_slice(&row[..width]);
            continue;
        }

        let depth = bit_depth as usize;
        let mask = (1u8 << bit_depth) - 1;
        for x in 0..width {
            let bit = x * depth;
            let shift = 8 - depth - bit % 8;
            indices.push((row[bit / 8] >> shift) & mask);
        }
    }

    indices
}

/// Encode a raster as PNG bytes: 8-bit indexed or RGBA8.
pub fn encode_png(raster: &Raster) -> std::result::Result<Vec<u8>, String> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(format!(
            "Cannot encode an empty {}x{} image",
            raster.width(),
            raster.height()
        ));
    }

    match raster.data() {
        PixelData::Indexed { palette, indices } => {
            encode_indexed(raster.width(), raster.height(), palette, indices)
        }
        PixelData::Direct(pixels) => encode_direct(raster.width(), raster.height(), pixels),
    }
}

fn encode_indexed(
    width: u32,
    height: u32,
    palette: &Palette,
    indices: &[u8],
) -> std::result::Result<Vec<u8>, String> {
    let (plte, trns) = palette.to_png_chunks();
    let mut bytes = Vec::new();

    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(plte);
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }

        let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
        writer.write_image_data(indices).map_err(|e| e.to_string())?;
        writer.finish().map_err(|e| e.to_string())?;
    }

    Ok(bytes)
}

fn encode_direct(width: u32, height: u32, pixels: &[Colour]) -> std::result::Result<Vec<u8>, String> {
    let raw: Vec<u8> = pixels.iter().flat_map(|c| c.to_rgba()).collect();
    let img = RgbaImage::from_raw(width, height, raw)
        .ok_or_else(|| "Pixel buffer does not match image size".to_string())?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}
