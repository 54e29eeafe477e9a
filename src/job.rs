//! One read -> window -> zoom -> write run, configured up front.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use enough::Stop;

use crate::bmp::{self, DecodeMode, EncodeRequest, HeaderStyle};
use crate::error::{BitmapError, ValidationError};
use crate::geometry::{Rect, ScaleFactor};
use crate::limits::Limits;
use crate::pixel::PixelBuffer;
use crate::variant::{Resampler, Variant};

/// Immutable configuration for a zoom run.
///
/// Defaults mirror the original tool: `lena.bmp` to `copy.bmp`, the whole
/// source as window, factor 3, vectorized kernels.
#[derive(Clone, Debug)]
pub struct ZoomJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Window size; `None` means the source's full width or height.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub x: u32,
    pub y: u32,
    pub factor: ScaleFactor,
    pub variant: Variant,
    /// Stop after the window and write it unscaled.
    pub window_only: bool,
    pub decode_mode: DecodeMode,
    pub header_style: HeaderStyle,
    pub limits: Limits,
}

impl Default for ZoomJob {
    fn default() -> Self {
        Self {
            input: PathBuf::from("lena.bmp"),
            output: PathBuf::from("copy.bmp"),
            width: None,
            height: None,
            x: 0,
            y: 0,
            factor: ScaleFactor::default(),
            variant: Variant::default(),
            window_only: false,
            decode_mode: DecodeMode::default(),
            header_style: HeaderStyle::default(),
            limits: Limits::default(),
        }
    }
}

/// Timings and sizes of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobReport {
    pub variant: Variant,
    pub source: (u32, u32),
    pub window: Rect,
    pub output: (u32, u32),
    pub window_time: Duration,
    /// `None` when the run stopped after the window.
    pub zoom_time: Option<Duration>,
}

impl ZoomJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_window(mut self, x: u32, y: u32, width: u32, height: u32) -> Self {
        self.x = x;
        self.y = y;
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_factor(mut self, factor: ScaleFactor) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Resolve the window against the source size and check it fits.
    pub fn window(&self, source_width: u32, source_height: u32) -> Result<Rect, ValidationError> {
        let rect = Rect::new(
            self.x,
            self.y,
            self.width.unwrap_or(source_width),
            self.height.unwrap_or(source_height),
        );
        rect.check_within(source_width, source_height)?;
        Ok(rect)
    }

    /// Run the whole pipeline.
    pub fn run(&self, stop: &dyn Stop) -> Result<JobReport, BitmapError> {
        log::debug!(target: "zenzoom::steps", "Reading {}", self.input.display());
        let source = bmp::read_with(&self.input, self.decode_mode, Some(&self.limits), stop)?;
        log::debug!(target: "zenzoom::steps", "Read finished");
        self.process(source, stop)
    }

    /// Window, zoom and write an already-decoded source.
    pub fn process(&self, source: PixelBuffer, stop: &dyn Stop) -> Result<JobReport, BitmapError> {
        let source_dims = (source.width(), source.height());
        let rect = self.window(source_dims.0, source_dims.1)?;
        if !self.window_only {
            let out_w = self.factor.apply(rect.width);
            let out_h = self.factor.apply(rect.height);
            match (out_w, out_h) {
                (Some(w), Some(h)) => self.limits.check_bgr(w, h)?,
                _ => {
                    return Err(BitmapError::DimensionsTooLarge {
                        width: rect.width,
                        height: rect.height,
                    });
                }
            }
        }
        log::debug!(target: "zenzoom::steps", "Input checks finished");

        let start = Instant::now();
        let window = self.variant.crop(&source, rect, stop)?;
        let window_time = start.elapsed();
        drop(source);
        log::info!(
            target: "zenzoom::steps",
            "Window: time taken: {} version: {:.6}s",
            self.variant,
            window_time.as_secs_f64()
        );

        let (result, zoom_time) = if self.window_only {
            (window, None)
        } else {
            let start = Instant::now();
            let zoomed = self.variant.zoom(&window, self.factor, stop)?;
            let elapsed = start.elapsed();
            log::info!(
                target: "zenzoom::steps",
                "Zoom: time taken: {} version: {:.6}s",
                self.variant,
                elapsed.as_secs_f64()
            );
            (zoomed, Some(elapsed))
        };

        EncodeRequest::new()
            .with_header_style(self.header_style)
            .write(&self.output, result.as_bytes(), result.width(), result.height(), stop)?;
        log::debug!(target: "zenzoom::steps", "Write finished");

        Ok(JobReport {
            variant: self.variant,
            source: source_dims,
            window: rect,
            output: (result.width(), result.height()),
            window_time,
            zoom_time,
        })
    }
}
