//! Build-time asset tooling for the LED sign.
//!
//! The sign firmware consumes generated C headers (bitmap fonts, emoji
//! tiles, LED coordinates) and ships animations that are prototyped on the
//! desktop first. This crate carries the shared pieces: the animation
//! engine, the CPL placement loader, glyph and emoji conversion, header
//! emission, and the USB DFU trigger. The converter binaries live in
//! `src/bin/`; the interactive preview lives in the `sign-simulation`
//! crate.

pub mod animation;
pub mod canvas;
pub mod color;
pub mod cpl;
pub mod dfu;
pub mod emit;
pub mod emoji;
pub mod error;
pub mod gfx;

pub use canvas::{Canvas, SignPoint};
pub use color::Rgb;
pub use error::ToolError;
