//! Raster encodings for exporting the drawing surface.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use thiserror::Error;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("PNG"),
            Self::Jpeg => f.write_str("JPEG"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(ExportError::UnsupportedFormat {
                name: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format `{name}`")]
    UnsupportedFormat { name: String },
    #[error("jpeg quality {quality} outside 1..=100")]
    InvalidJpegQuality { quality: u8 },
    #[error("failed to encode {format} image: {source}")]
    Encode {
        format: ExportFormat,
        #[source]
        source: image::ImageError,
    },
    #[error("system time before unix epoch: {message}")]
    Clock { message: String },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

pub fn validate_jpeg_quality(quality: u8) -> ExportResult<u8> {
    if (1..=100).contains(&quality) {
        Ok(quality)
    } else {
        Err(ExportError::InvalidJpegQuality { quality })
    }
}

/// Encodes an opaque RGBA image. JPEG drops the alpha channel.
pub fn encode_rgba(
    image: &RgbaImage,
    format: ExportFormat,
    jpeg_quality: u8,
) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let (width, height) = image.dimensions();
    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Jpeg => {
            let quality = validate_jpeg_quality(jpeg_quality)?;
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|source| ExportError::Encode { format, source })?;
    Ok(bytes)
}

pub fn unix_timestamp_ms(at: SystemTime) -> ExportResult<u128> {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .map_err(|err| ExportError::Clock {
            message: err.to_string(),
        })
}

/// `{unix_timestamp_ms}.{ext}`
pub fn export_file_name(format: ExportFormat, at: SystemTime) -> ExportResult<String> {
    Ok(format!("{}.{}", unix_timestamp_ms(at)?, format.extension()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(format: ExportFormat, bytes: Vec<u8>, at: SystemTime) -> ExportResult<Self> {
        Ok(Self {
            file_name: export_file_name(format, at)?,
            format,
            bytes,
        })
    }
}
