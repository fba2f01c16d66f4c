//! Emoji PNG-export conversion to the firmware's RGB grids.
//!
//! Exported images are named `NNN_<hex[-hex...]>.png`, a running index
//! followed by the code point sequence (joiners and variant selectors
//! already stripped by the exporter).

use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;

use crate::error::ToolError;

/// Emoji tile edge length on the sign matrix.
pub const EMOJI_SIZE: u32 = 7;

/// Display gamma applied per channel before emission.
pub const EMOJI_GAMMA: f32 = 2.75;

pub type EmojiPixels = [[[u8; 3]; EMOJI_SIZE as usize]; EMOJI_SIZE as usize];

/// One converted emoji: the C identifier it is emitted under, its code point
/// sequence, and the gamma-corrected pixel grid.
#[derive(Debug, Clone)]
pub struct EmojiBitmap {
    pub array_name: String,
    pub code_points: Vec<u32>,
    pub pixels: EmojiPixels,
}

impl EmojiBitmap {
    /// First code point of the sequence; the firmware lookup table keys on it.
    pub fn unicode(&self) -> u32 {
        self.code_points.first().copied().unwrap_or(0)
    }

    /// The rendered character sequence, for header comments.
    pub fn characters(&self) -> String {
        self.code_points
            .iter()
            .filter_map(|&cp| char::from_u32(cp))
            .collect()
    }

    /// UTF-8 bytes of the full sequence.
    pub fn utf8_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for ch in self.code_points.iter().filter_map(|&cp| char::from_u32(cp)) {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        bytes
    }
}

/// Applies the display gamma to one channel.
pub fn gamma_correct(value: u8, gamma: f32) -> u8 {
    (255.0 * (f32::from(value) / 255.0).powf(gamma)) as u8
}

/// Parses an export file stem into its name part and code points.
/// Returns `None` when the stem does not follow `NNN_<hex[-hex...]>`.
pub fn parse_export_stem(stem: &str) -> Option<(&str, Vec<u32>)> {
    let prefix = stem.get(..4)?;
    if !prefix.ends_with('_') || !prefix[..3].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let name = stem.get(4..)?;
    let code_points = name
        .split('-')
        .map(|cp| u32::from_str_radix(cp, 16).ok())
        .collect::<Option<Vec<u32>>>()?;
    Some((name, code_points))
}

/// Loads an export PNG, scales it to the emoji tile size, and applies the
/// display gamma.
pub fn convert_image(path: &Path) -> Result<RgbImage, ToolError> {
    let image = image::open(path)?;
    let mut resized = image
        .resize_exact(EMOJI_SIZE, EMOJI_SIZE, FilterType::Lanczos3)
        .to_rgb8();
    for pixel in resized.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = gamma_correct(*channel, EMOJI_GAMMA);
        }
    }
    Ok(resized)
}

/// Copies a converted tile into the nested-array form the header emitter
/// works from.
pub fn to_grid(image: &RgbImage) -> EmojiPixels {
    let mut pixels = [[[0u8; 3]; EMOJI_SIZE as usize]; EMOJI_SIZE as usize];
    for y in 0..EMOJI_SIZE {
        for x in 0..EMOJI_SIZE {
            pixels[y as usize][x as usize] = image.get_pixel(x, y).0;
        }
    }
    pixels
}

/// Builds the [`EmojiBitmap`] for one export file.
pub fn load_export(path: &Path) -> Result<EmojiBitmap, ToolError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ToolError::BadEmojiFilename(path.display().to_string()))?;
    let (name, code_points) = parse_export_stem(stem)
        .ok_or_else(|| ToolError::BadEmojiFilename(stem.to_string()))?;
    let image = convert_image(path)?;
    Ok(EmojiBitmap {
        array_name: format!("emoji_{}", name.replace('-', "_")),
        code_points,
        pixels: to_grid(&image),
    })
}
