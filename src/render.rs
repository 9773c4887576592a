//! Rendering of zone color grids to image files

use crate::color::Rgb;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Drawn for any pixel whose color cannot be parsed
const UNKNOWN_PIXEL: Rgb = Rgb { r: 64, g: 64, b: 64 };

/// Save a row-major color grid to a PPM file
pub fn save_ppm(colors: &[String], width: usize, filename: &str, scale: usize) -> io::Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    write_ppm(file, colors, width, scale)
}

/// Write a row-major color grid as plain PPM, each pixel `scale` x `scale`.
///
/// A trailing partial row is padded with black.
pub fn write_ppm<W: Write>(mut out: W, colors: &[String], width: usize, scale: usize) -> io::Result<()> {
    let width = width.max(1);
    let scale = scale.max(1);
    let height = colors.len().div_ceil(width);

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width * scale, height * scale)?;
    writeln!(out, "255")?;

    for img_y in 0..height * scale {
        for img_x in 0..width * scale {
            let idx = (img_y / scale) * width + img_x / scale;
            let pixel = match colors.get(idx) {
                Some(color) => Rgb::from_hex(color).unwrap_or(UNKNOWN_PIXEL),
                None => Rgb::new(0, 0, 0),
            };
            write!(out, "{} {} {} ", pixel.r, pixel.g, pixel.b)?;
        }
        writeln!(out)?;
    }

    out.flush()
}
