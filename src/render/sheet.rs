//! Sheet frame metadata.
//!
//! Describes where each frame landed in a composed sheet, in a
//! TexturePacker-compatible JSON Hash format for game engine interop.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SplatterError};
use crate::types::SourceImage;

use super::compose::{row_offsets, sheet_size};

/// A frame in the sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Sprite sheet metadata.
#[derive(Debug, Clone)]
pub struct SheetMeta {
    pub frames: Vec<Frame>,
    pub image: String,
    pub size: (u32, u32),
}

impl SheetMeta {
    /// Describe a vertical stack of frames.
    ///
    /// `names` pairs with `images`; each frame is named after its file stem.
    pub fn for_stack(
        image: &str,
        names: &[String],
        images: &[SourceImage],
        margin: u32,
    ) -> Result<Self> {
        let offsets = row_offsets(images, margin)?;
        let frames = names
            .iter()
            .zip(images.iter().zip(offsets))
            .map(|(name, (img, y))| Frame {
                name: frame_name(name),
                x: 0,
                y,
                w: img.width(),
                h: img.height(),
            })
            .collect();

        Ok(Self {
            frames,
            image: image.to_string(),
            size: sheet_size(images, margin)?,
        })
    }
}

/// Frame name for a source file: the filename without its `.png` extension.
fn frame_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

/// Write sheet metadata as TexturePacker-compatible JSON Hash format.
pub fn write_sheet_json(meta: &SheetMeta, path: &Path) -> Result<()> {
    let output = TexturePackerJson::from_meta(meta);
    let json = serde_json::to_string_pretty(&output).map_err(|e| SplatterError::Encode {
        path: path.to_path_buf(),
        message: format!("Failed to serialize sheet metadata: {}", e),
    })?;
    fs::write(path, json).map_err(|e| SplatterError::Encode {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })?;
    Ok(())
}

// --- TexturePacker JSON serialization types ---

#[derive(Serialize)]
struct TexturePackerJson {
    frames: BTreeMap<String, TPFrame>,
    meta: TPMeta,
}

#[derive(Serialize)]
struct TPFrame {
    frame: TPRect,
    rotated: bool,
    trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    sprite_source_size: TPRect,
    #[serde(rename = "sourceSize")]
    source_size: TPSize,
}

#[derive(Serialize)]
struct TPRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPSize {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPMeta {
    app: String,
    version: String,
    image: String,
    size: TPSize,
    scale: String,
}

impl TexturePackerJson {
    fn from_meta(meta: &SheetMeta) -> Self {
        let frames = meta
            .frames
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    TPFrame {
                        frame: TPRect {
                            x: f.x,
                            y: f.y,
                            w: f.w,
                            h: f.h,
                        },
                        rotated: false,
                        trimmed: false,
                        sprite_source_size: TPRect {
                            x: 0,
                            y: 0,
                            w: f.w,
                            h: f.h,
                        },
                        source_size: TPSize { w: f.w, h: f.h },
                    },
                )
            })
            .collect();

        TexturePackerJson {
            frames,
            meta: TPMeta {
                app: "splatter".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                image: meta.image.clone(),
                size: TPSize {
                    w: meta.size.0,
                    h: meta.size.1,
                },
                scale: "1".to_string(),
            },
        }
    }
}
