//! Built-in raster encoding for processed plan images.
//!
//! The real cleanup routine returns an already-encoded raster; when running
//! without it the pipeline still needs a displayable artifact. This module
//! encodes the raw 1/24/32 bits-per-pixel buffers the collaborator emits as
//! BMP, which needs no compression support on the reading side.
//!
//! BMP stores rows bottom-up and 32-bit aligned; 1-bit images carry a
//! two-entry black/white color table.

use crate::error::{PlanError, Result};
use crate::processor::{ImageProcessor, ProcessedArtifact};

/// Align a value to a 4-byte boundary (32-bit alignment for BMP rows).
const fn align32(x: u32) -> u32 {
    x.div_ceil(4) * 4
}

/// Encode a raw pixel buffer as a BMP file.
///
/// Accepts the three encodings the pipeline dispatches: 1 bpp packed
/// black/white, 24 bpp RGB, and 32 bpp RGBA. RGBA loses its alpha channel;
/// the plan sheets this pipeline handles are fully opaque scans.
pub fn encode_bmp(bits_per_pixel: u8, width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(PlanError::UnsupportedRaster(format!(
            "empty image: {width}x{height}"
        )));
    }

    let (out_bits, ncols): (u16, u32) = match bits_per_pixel {
        1 => (1, 2),
        24 | 32 => (24, 0),
        other => {
            return Err(PlanError::UnsupportedRaster(format!(
                "{other} bits per pixel"
            )));
        }
    };

    let src_row = match bits_per_pixel {
        1 => width.div_ceil(8) as usize,
        24 => width as usize * 3,
        _ => width as usize * 4,
    };
    let expected = src_row * height as usize;
    if data.len() < expected {
        return Err(PlanError::UnsupportedRaster(format!(
            "pixel buffer too short: {} < {expected}",
            data.len()
        )));
    }

    let line_size = align32((u32::from(out_bits) * width).div_ceil(8)) as usize;
    let data_size = line_size * height as usize;
    let header_size = 14 + 40 + ncols as usize * 4;

    let mut out = Vec::with_capacity(header_size + data_size);

    // BITMAPFILEHEADER (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((header_size + data_size) as u32).to_le_bytes()); // bfSize
    out.extend_from_slice(&0u16.to_le_bytes()); // bfReserved1
    out.extend_from_slice(&0u16.to_le_bytes()); // bfReserved2
    out.extend_from_slice(&(header_size as u32).to_le_bytes()); // bfOffBits

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes()); // biSize
    out.extend_from_slice(&(width as i32).to_le_bytes()); // biWidth
    out.extend_from_slice(&(height as i32).to_le_bytes()); // biHeight
    out.extend_from_slice(&1u16.to_le_bytes()); // biPlanes
    out.extend_from_slice(&out_bits.to_le_bytes()); // biBitCount
    out.extend_from_slice(&0u32.to_le_bytes()); // biCompression
    out.extend_from_slice(&(data_size as u32).to_le_bytes()); // biSizeImage
    out.extend_from_slice(&0i32.to_le_bytes()); // biXPelsPerMeter
    out.extend_from_slice(&0i32.to_le_bytes()); // biYPelsPerMeter
    out.extend_from_slice(&ncols.to_le_bytes()); // biClrUsed
    out.extend_from_slice(&0u32.to_le_bytes()); // biClrImportant

    if ncols == 2 {
        // B&W color table
        for &v in &[0u8, 255u8] {
            out.extend_from_slice(&[v, v, v, 0]);
        }
    }

    // Rows are stored bottom-up.
    for y in (0..height as usize).rev() {
        let row = &data[y * src_row..(y + 1) * src_row];
        let start = out.len();
        match bits_per_pixel {
            1 => out.extend_from_slice(row),
            24 => {
                // BMP wants BGR channel order.
                for px in row.chunks_exact(3) {
                    out.extend_from_slice(&[px[2], px[1], px[0]]);
                }
            }
            _ => {
                for px in row.chunks_exact(4) {
                    out.extend_from_slice(&[px[2], px[1], px[0]]);
                }
            }
        }
        out.resize(start + line_size, 0);
    }

    Ok(out)
}

/// An `ImageProcessor` that passes pixels through `encode_bmp` untouched.
///
/// Used where the real cleanup routine is unavailable; it never produces an
/// overlay.
#[derive(Debug, Default)]
pub struct RasterProcessor;

impl RasterProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProcessor for RasterProcessor {
    fn process(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u8,
    ) -> Result<ProcessedArtifact> {
        let image = encode_bmp(bits_per_pixel, width, height, pixels)?;
        Ok(ProcessedArtifact {
            image,
            mime: "image/bmp",
            overlay: None,
        })
    }
}
