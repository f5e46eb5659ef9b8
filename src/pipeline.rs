use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::frame::{FrameSource, ImageFrameSource};
use crate::models::Message;
use crate::scanner::{DmtxScanner, RegionScanner};

/// Outcome of scanning one image blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Byte length of the input blob
    pub size: usize,
    /// Canonical code text per decoded symbol, in frame order then discovery order
    pub codes: Vec<String>,
}

/// Symbols found in one frame
#[derive(Debug, Clone)]
pub struct FrameScan {
    /// Zero-based frame index within the image
    pub index: usize,
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
    /// Decoded symbols in discovery order
    pub messages: Vec<Message>,
}

/// Frame source, region scanner and codec wired together
pub struct ScanPipeline<F = ImageFrameSource, R = DmtxScanner> {
    config: ScanConfig,
    source: F,
    scanner: R,
}

impl ScanPipeline {
    /// Pipeline with the `image` frame source and the default scanner
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            source: ImageFrameSource::new(),
            scanner: DmtxScanner::new(config),
        }
    }
}

impl Default for ScanPipeline {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl<F: FrameSource, R: RegionScanner> ScanPipeline<F, R> {
    /// Pipeline over custom backends
    pub fn with_backends(config: ScanConfig, source: F, scanner: R) -> Self {
        Self {
            config,
            source,
            scanner,
        }
    }

    /// Configuration the pipeline runs with
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Lazily decode and scan each frame of `blob` in order.
    ///
    /// Each frame is decoded only when the iterator reaches it, and its
    /// buffers are released before the next one is pulled. The `stop_after`
    /// limit applies within every frame.
    pub fn scan_frames<'a>(
        &'a self,
        blob: &'a [u8],
    ) -> Result<impl Iterator<Item = Result<FrameScan>> + 'a> {
        let frames = self.source.frames(blob)?;
        Ok(frames.enumerate().map(move |(index, frame)| {
            let frame = frame?;
            let (width, height) = (frame.width(), frame.height());
            debug!(index, width, height, "scanning frame");
            let messages = self.scanner.scan_all(&frame, self.config.stop_after)?;
            Ok(FrameScan {
                index,
                width,
                height,
                messages,
            })
        }))
    }

    /// Decode `blob`, scan every frame and render each payload as code text.
    ///
    /// Any error aborts the run; no partial result is returned.
    pub fn run(&self, blob: &[u8]) -> Result<ScanResult> {
        let mut codes = Vec::new();
        for scan in self.scan_frames(blob)? {
            codes.extend(scan?.messages.iter().map(codec::to_text));
        }

        Ok(ScanResult {
            size: blob.len(),
            codes,
        })
    }
}
