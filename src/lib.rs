//! # zenzoom
//!
//! Cut a window out of an uncompressed 24-bit BMP and upscale it by an
//! integer factor with nearest-neighbor resampling.
//!
//! ## Pipeline
//!
//! [`bmp::read`] decodes to a [`PixelBuffer`], [`crop`] copies the window,
//! [`zoom`] scales it, and [`bmp::write`] encodes the result. Each stage
//! returns a new buffer; nothing is modified in place. [`ZoomJob`] wires
//! the four together from one immutable configuration.
//!
//! ## Row order
//!
//! Buffers keep the file's row order. For a normal bottom-up bitmap,
//! row 0 is the bottom scanline, so a window's `y` offset counts from the
//! bottom of the picture.
//!
//! ## Variants
//!
//! [`Variant`] selects between the scalar reference and two faster
//! kernels. All three are byte-identical; tests enforce it.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade on the targets
//! `zenzoom::read`, `zenzoom::write`, `zenzoom::window`, `zenzoom::zoom`
//! and `zenzoom::steps`. Stage timings are logged at `info` on
//! `zenzoom::steps`.
//!
//! ## Usage
//!
//! ```no_run
//! use zenzoom::{Rect, ScaleFactor, Unstoppable, bmp, crop, zoom};
//!
//! let source = bmp::read("lena.bmp", &Unstoppable)?;
//! let window = crop(&source, Rect::new(16, 16, 64, 64), &Unstoppable)?;
//! let factor = ScaleFactor::new(3)?;
//! let zoomed = zoom(&window, factor, &Unstoppable)?;
//! bmp::write("copy.bmp", zoomed.as_bytes(), 64, 64, factor, &Unstoppable)?;
//! # Ok::<(), zenzoom::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod crop;
mod error;
mod geometry;
mod limits;
mod pixel;
mod variant;
mod zoom;

pub mod bmp;

#[cfg(feature = "std")]
mod job;

// Re-exports
pub use crop::crop;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{BitmapError, ValidationError};
pub use geometry::{Rect, ScaleFactor};
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, PixelBuffer};
pub use variant::{Resampler, Variant};
pub use zoom::{parent_coordinate, zoom};

#[cfg(feature = "std")]
pub use job::{JobReport, ZoomJob};
