//! CPL (pick-and-place) loading.
//!
//! The board's CPL export carries every component placement; the LEDs are the
//! designators prefixed `P`, and the first [`MATRIX_LED_COUNT`] of them belong
//! to the character matrix while the rest trace the sign outline.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::canvas::SignPoint;
use crate::error::ToolError;

/// Number of LEDs in the character matrix; the remaining placements belong to
/// the sign outline.
pub const MATRIX_LED_COUNT: usize = 280;

#[derive(Debug, Deserialize)]
struct CplRecord {
    #[serde(rename = "Designator")]
    designator: String,
    #[serde(rename = "Mid X")]
    mid_x: f32,
    #[serde(rename = "Mid Y")]
    mid_y: f32,
    #[serde(rename = "Rotation")]
    rotation: f32,
}

/// Reads a CPL export and keeps the LED placements (designators prefixed
/// `"P"`) in file order.
pub fn read_cpl<R: Read>(reader: R) -> Result<Vec<SignPoint>, ToolError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for result in rdr.deserialize() {
        let record: CplRecord = result?;
        if !record.designator.starts_with('P') {
            continue;
        }
        points.push(SignPoint {
            reference: record.designator,
            x: record.mid_x,
            y: record.mid_y,
            rotation: record.rotation,
        });
    }
    Ok(points)
}

pub fn read_cpl_file(path: &Path) -> Result<Vec<SignPoint>, ToolError> {
    let file = std::fs::File::open(path)?;
    read_cpl(file)
}

/// Splits the placements into the matrix bank and the sign bank at the fixed
/// [`MATRIX_LED_COUNT`] boundary.
pub fn split_banks(mut points: Vec<SignPoint>) -> (Vec<SignPoint>, Vec<SignPoint>) {
    if points.len() <= MATRIX_LED_COUNT {
        return (points, Vec::new());
    }
    let sign = points.split_off(MATRIX_LED_COUNT);
    (points, sign)
}
