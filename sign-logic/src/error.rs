//! Error type shared by the converter pipelines.

use std::fmt;

/// Errors surfaced by the converters and the DFU utility.
#[derive(Debug)]
pub enum ToolError {
    Io(std::io::Error),
    Csv(csv::Error),
    Image(image::ImageError),
    /// Font parsing failure reported by the rasterizer.
    Font(&'static str),
    Usb(rusb::Error),
    /// An export file name that does not follow `NNN_<hex[-hex...]>.png`.
    BadEmojiFilename(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Io(err) => write!(f, "i/o error: {err}"),
            ToolError::Csv(err) => write!(f, "CPL parse error: {err}"),
            ToolError::Image(err) => write!(f, "image error: {err}"),
            ToolError::Font(err) => write!(f, "font error: {err}"),
            ToolError::Usb(err) => write!(f, "usb error: {err}"),
            ToolError::BadEmojiFilename(name) => {
                write!(f, "emoji export file name not understood: {name}")
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io(err) => Some(err),
            ToolError::Csv(err) => Some(err),
            ToolError::Image(err) => Some(err),
            ToolError::Usb(err) => Some(err),
            ToolError::Font(_) | ToolError::BadEmojiFilename(_) => None,
        }
    }
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::Io(err)
    }
}

impl From<csv::Error> for ToolError {
    fn from(err: csv::Error) -> Self {
        ToolError::Csv(err)
    }
}

impl From<image::ImageError> for ToolError {
    fn from(err: image::ImageError) -> Self {
        ToolError::Image(err)
    }
}

impl From<rusb::Error> for ToolError {
    fn from(err: rusb::Error) -> Self {
        ToolError::Usb(err)
    }
}
