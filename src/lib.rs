//! rust_dmtx - Data Matrix (ECC200) scanning in pure Rust
//!
//! Decodes an encoded image blob (PNG, GIF, JPEG, ...) into frames, locates
//! every Data Matrix symbol in each frame and reports the payloads as
//! space-separated uppercase hex text.
//!
//! ```no_run
//! use rust_dmtx::{ScanConfig, scan};
//!
//! let blob = std::fs::read("label.png").unwrap();
//! let result = scan(&blob, ScanConfig::default().with_stop_after(Some(1))).unwrap();
//! for code in &result.codes {
//!     println!("{code}");
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Payload bytes to canonical code text
pub mod codec;
/// Scan options and detector tunables
pub mod config;
/// Data Matrix decoding modules (placement, error correction, data modes)
pub mod decoder;
/// Data Matrix detection modules (components, orientation, hypotheses)
pub mod detector;
/// Error type shared by every stage
pub mod error;
/// Frame extraction from encoded images
pub mod frame;
/// Core data structures (BitMatrix, Point, SymbolSize, Message)
pub mod models;
/// Frame source, scanner and codec wired together
pub mod pipeline;
/// Region discovery and decoding within one frame
pub mod scanner;
/// Utility functions (grayscale, binarization, geometry, shrinking)
pub mod utils;

pub use config::ScanConfig;
pub use error::{Error, Result};
pub use frame::{Frame, FrameSource, ImageFrameSource};
pub use models::{BitMatrix, Message, Point, SymbolSize};
pub use pipeline::{FrameScan, ScanPipeline, ScanResult};
pub use scanner::{DmtxScanner, RegionScanner};

/// Scan an encoded image blob with the default backends
///
/// # Arguments
/// * `blob` - Encoded image bytes in any format the `image` crate recognises
/// * `config` - Shrink, correction and early-stop options
///
/// # Returns
/// The blob size and one code per decoded symbol, frame order first
pub fn scan(blob: &[u8], config: ScanConfig) -> Result<ScanResult> {
    ScanPipeline::new(config).run(blob)
}
