//! PNG export of rendered surfaces.

use super::target::PixelBuffer;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while exporting a surface.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface of {width}x{height} cannot be exported")]
    InvalidSize { width: u32, height: u32 },

    #[error("Failed to create image surface: {0}")]
    Surface(#[from] cairo::Error),

    #[error("Image surface is already borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Copies a pixel buffer into a cairo `ARgb32` image surface.
pub fn to_image_surface(buffer: &PixelBuffer) -> Result<cairo::ImageSurface, ExportError> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(ExportError::InvalidSize { width, height });
    }

    let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface.data()?;
        for (row, pixels) in buffer.pixels().chunks(width as usize).enumerate() {
            let line = &mut data[row * stride..row * stride + width as usize * 4];
            for (dst, color) in line.chunks_exact_mut(4).zip(pixels) {
                dst.copy_from_slice(&color.to_premultiplied_argb().to_ne_bytes());
            }
        }
    }
    Ok(surface)
}

/// Encodes a pixel buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
    let surface = to_image_surface(buffer)?;
    let mut bytes = Vec::new();
    surface.write_to_png(&mut bytes)?;
    Ok(bytes)
}

/// Writes a pixel buffer to `path` as PNG, creating parent directories as needed.
///
/// # Returns
/// Path of the written file
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        log::info!("Creating output directory: {}", parent.display());
        fs::create_dir_all(parent)?;
    }

    let bytes = encode_png(buffer)?;
    log::info!("Saving image to: {} ({} bytes)", path.display(), bytes.len());
    fs::write(path, &bytes)?;

    Ok(path.to_path_buf())
}
