//! Region scanning: find candidate regions in a frame and decode them
//!
//! A [`DecodeContext`] owns every per-frame working buffer: the full
//! resolution luma plane, the (optionally shrunk) search plane, its binary
//! image and component map. [`DecodeContext::find_next`] hands out one region
//! at a time; [`DecodeContext::decode`] turns a region into a [`Message`].

use tracing::{debug, trace};

use crate::codec::preview;
use crate::config::{ScanConfig, max_hypotheses, min_candidate_side};
use crate::decoder::SymbolDecoder;
use crate::detector::connected_components::ComponentMap;
use crate::detector::grid::{GrayView, SymbolGrid};
use crate::detector::orientation::{dominant_angle, oriented_corners, refine_angle};
use crate::detector::Region;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::models::{BitMatrix, Message, Point, quad_contains};
use crate::utils::binarization::{adaptive_binarize, otsu_binarize, otsu_threshold};
use crate::utils::grayscale::rgb_to_grayscale;
use crate::utils::shrink::downsample;

/// Search planes at least this large on either side use adaptive binarization
const ADAPTIVE_MIN_SIDE: usize = 800;

/// Finds and decodes every symbol in a frame
pub trait RegionScanner {
    /// Decode the frame's symbols in discovery order.
    ///
    /// With `stop_after` set, scanning of the frame ends after the first
    /// region attempt at which that many symbols have been decoded, so
    /// `Some(0)` still attempts one region.
    fn scan_all(&self, frame: &Frame, stop_after: Option<usize>) -> Result<Vec<Message>>;
}

/// Per-frame discovery state and working buffers
pub struct DecodeContext {
    gray: Vec<u8>,
    width: usize,
    height: usize,
    search: Vec<u8>,
    search_width: usize,
    search_height: usize,
    shrink: usize,
    components: ComponentMap,
    next_component: usize,
    handed_out: Vec<[Point; 4]>,
}

impl DecodeContext {
    /// Build the luma, search and component buffers for `frame`
    pub fn new(frame: &Frame, shrink: usize) -> Result<Self> {
        let (width, height) = (frame.width(), frame.height());
        let shrink = shrink.max(1);

        let gray = rgb_to_grayscale(frame.rgb(), width, height)?;
        let (search, search_width, search_height) = downsample(&gray, width, height, shrink)?;

        let binary: BitMatrix = if search_width >= ADAPTIVE_MIN_SIDE || search_height >= ADAPTIVE_MIN_SIDE {
            let window = (search_width.min(search_height) / 10).max(31) | 1;
            adaptive_binarize(&search, search_width, search_height, window)?
        } else {
            otsu_binarize(&search, search_width, search_height)?
        };
        let components = ComponentMap::label(&binary)?;

        debug!(
            width,
            height,
            shrink,
            candidates = components.components().len(),
            "prepared decode context"
        );

        Ok(Self {
            gray,
            width,
            height,
            search,
            search_width,
            search_height,
            shrink,
            components,
            next_component: 0,
            handed_out: Vec::new(),
        })
    }

    fn full_view(&self) -> GrayView<'_> {
        GrayView::new(&self.gray, self.width, self.height)
    }

    /// Next region worth decoding, or `None` once every candidate has been examined
    pub fn find_next(&mut self) -> Result<Option<Region>> {
        let min_side = min_candidate_side();
        let scale = self.shrink as f32;

        while let Some(&component) = self.components.components().get(self.next_component) {
            self.next_component += 1;

            if component.width() < min_side || component.height() < min_side {
                continue;
            }
            let centre = component.center().scale(scale);
            if self.handed_out.iter().any(|quad| quad_contains(quad, &centre)) {
                trace!(x = centre.x, y = centre.y, "candidate inside an earlier region");
                continue;
            }

            let points = self
                .components
                .boundary_points(&component)
                .map_err(|e| Error::Scan(format!("boundary scratch: {e}")))?;
            let coarse = dominant_angle(&self.search, self.search_width, self.search_height, &points);
            let theta = refine_angle(&points, coarse);
            let outline = oriented_corners(&points, theta).map(|p| p.scale(scale));

            let threshold = self.outline_threshold(&outline);
            let region = Region::new(self.full_view(), outline, threshold);
            if region.hypotheses.is_empty() {
                trace!(
                    x = centre.x,
                    y = centre.y,
                    angle = theta.to_degrees(),
                    "no symbol hypothesis for candidate"
                );
                continue;
            }

            self.handed_out
                .try_reserve(1)
                .map_err(|e| Error::Scan(format!("region list: {e}")))?;
            self.handed_out.push(region.outline);
            return Ok(Some(region));
        }

        Ok(None)
    }

    /// Otsu threshold over the full-resolution bounding box of `outline`
    fn outline_threshold(&self, outline: &[Point; 4]) -> u8 {
        let clamp_x = |v: f32| (v.max(0.0) as usize).min(self.width);
        let clamp_y = |v: f32| (v.max(0.0) as usize).min(self.height);
        let x0 = clamp_x(outline.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor());
        let x1 = clamp_x(outline.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil());
        let y0 = clamp_y(outline.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor());
        let y1 = clamp_y(outline.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil());

        let width = self.width;
        otsu_threshold(
            (y0..y1).flat_map(|y| self.gray[y * width + x0..y * width + x1].iter().copied()),
        )
    }

    /// Try the region's hypotheses best first; the first one that decodes wins
    pub fn decode(&self, region: &Region, corrections_max: Option<usize>) -> Option<Message> {
        for hypothesis in region.hypotheses.iter().take(max_hypotheses()) {
            let grid = SymbolGrid::new(
                self.full_view(),
                hypothesis.transform,
                hypothesis.size,
                region.threshold,
            );
            let Some(modules) = grid.sample() else {
                continue;
            };
            match SymbolDecoder::decode(&modules, &hypothesis.size, corrections_max) {
                Some(decoded) => {
                    debug!(
                        size = %hypothesis.size,
                        corrections = decoded.corrections,
                        score = hypothesis.score,
                        payload = %preview(&decoded.bytes, 32),
                        "decoded region"
                    );
                    return Some(Message::new(
                        decoded.bytes,
                        hypothesis.size,
                        hypothesis.corners,
                        decoded.corrections,
                    ));
                }
                None => trace!(size = %hypothesis.size, score = hypothesis.score, "hypothesis failed"),
            }
        }
        None
    }
}

/// Default scanner: connected-component discovery with ECC200 decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct DmtxScanner {
    config: ScanConfig,
}

impl DmtxScanner {
    /// Scanner using the shrink and correction options of `config`
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }
}

impl RegionScanner for DmtxScanner {
    fn scan_all(&self, frame: &Frame, stop_after: Option<usize>) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut context = DecodeContext::new(frame, self.config.effective_shrink())?;
        let mut attempts = 0usize;

        while let Some(region) = context.find_next()? {
            attempts += 1;
            if let Some(message) = context.decode(&region, self.config.corrections_max) {
                messages.push(message);
            }
            if stop_after.is_some_and(|limit| messages.len() >= limit) {
                debug!(attempts, "stop_after reached");
                break;
            }
        }

        debug!(attempts, decoded = messages.len(), "frame scanned");
        Ok(messages)
    }
}
