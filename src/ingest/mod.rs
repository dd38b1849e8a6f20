use crate::config::{JPEG_QUALITY, MAX_DIMENSION, Settings};
use crate::error::ProcessingError;
use crate::models::ImageFile;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Bound on the longest side, in pixels.
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl From<&Settings> for ResizeOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_dimension: settings.max_dimension,
            jpeg_quality: settings.jpeg_quality,
        }
    }
}

/// Target size for an image, shrinking the longest side to `max` and never
/// enlarging. Fractional sides are truncated.
pub fn bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = |side: u32, long: u32| ((u64::from(side) * u64::from(max)) / u64::from(long)) as u32;

    let (w, h) = if width > height {
        if width > max {
            (max, scale(height, width))
        } else {
            (width, height)
        }
    } else if height > max {
        (scale(width, height), max)
    } else {
        (width, height)
    };
    (w.max(1), h.max(1))
}

/// Decodes any supported raster format and re-encodes it as a bounded JPEG
/// data URL.
pub fn resize_to_data_url(bytes: &[u8], options: ResizeOptions) -> Result<String, ProcessingError> {
    let img = image::load_from_memory(bytes).map_err(ProcessingError::Decode)?;
    let (width, height) = (img.width(), img.height());
    let (target_w, target_h) = bounded_dimensions(width, height, options.max_dimension);

    let img = if (target_w, target_h) != (width, height) {
        debug!("Resizing {}x{} to {}x{}", width, height, target_w, target_h);
        img.resize_exact(target_w, target_h, FilterType::Triangle)
    } else {
        img
    };

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, options.jpeg_quality)
        .encode_image(&img.to_rgb8())
        .map_err(ProcessingError::Encode)?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

/// Reads one file from disk into an [`ImageFile`].
pub fn ingest_file(path: &Path, options: ResizeOptions) -> Result<ImageFile, ProcessingError> {
    let bytes = fs::read(path).map_err(|source| ProcessingError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let data_url = resize_to_data_url(&bytes, options)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageFile::new(name, data_url))
}

/// Processes every file concurrently and returns them in input order. One
/// failure fails the whole batch.
pub async fn ingest_files(
    paths: &[PathBuf],
    options: ResizeOptions,
) -> Result<Vec<ImageFile>, ProcessingError> {
    info!("Processing {} image(s)", paths.len());

    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| tokio::task::spawn_blocking(move || ingest_file(&path, options)))
        .collect();

    let mut images = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await? {
            Ok(image) => images.push(image),
            Err(e) => {
                error!("Image batch rejected: {}", e);
                return Err(e);
            }
        }
    }

    info!("Processed {} image(s)", images.len());
    Ok(images)
}
