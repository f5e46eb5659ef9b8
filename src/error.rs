//! Error types for scanning operations

use std::collections::TryReserveError;

use image::error::{ImageError, LimitErrorKind};

/// Errors that can occur while scanning an image for Data Matrix symbols
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The blob could not be parsed as an image, or its pixels could not be
    /// extracted as packed RGB
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// Region discovery failed for a reason other than running out of regions
    #[error("Region scan failed: {0}")]
    Scan(String),

    /// A working buffer for a frame could not be allocated
    #[error("Allocation failed: {0}")]
    Allocation(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        match &err {
            ImageError::Limits(limit) if matches!(limit.kind(), LimitErrorKind::InsufficientMemory) => {
                Error::Allocation(err.to_string())
            }
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Allocation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::error::LimitError;

    #[test]
    fn test_memory_limit_maps_to_allocation() {
        let err = ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory));
        assert!(matches!(Error::from(err), Error::Allocation(_)));

        let err = ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError));
        assert!(matches!(Error::from(err), Error::ImageDecode(_)));
    }

    #[test]
    fn test_try_reserve_maps_to_allocation() {
        let mut buf: Vec<u8> = Vec::new();
        let err = buf.try_reserve_exact(usize::MAX).unwrap_err();
        let err = Error::from(err);
        assert!(matches!(err, Error::Allocation(_)));
        assert!(err.to_string().starts_with("Allocation failed"));
    }
}
