//! # KalaKini Booth
//!
//! Photobooth image pipeline: capture three frames, bake in an optional
//! pixel filter, and composite them into a fixed-size vertical photo strip.
//!
//! This library provides the filter, overlay animation and strip compositing
//! core, plus the session logic that drives a booth from a frame source to a
//! downloadable PNG.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use kalakini_booth::{
//!     config::Config,
//!     filters::FilterSelection,
//!     session::{Booth, SequenceSource},
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let source = SequenceSource::from_files(&["a.jpg", "b.jpg", "c.jpg"]).await?;
//! let mut booth = Booth::new(Config::default(), source);
//! booth.start()?;
//! booth.select_filter(FilterSelection::Vintage, Duration::ZERO);
//!
//! for _ in 0..3 {
//!     booth.capture()?;
//! }
//! let path = booth.download_strip(None).await?;
//! println!("Strip saved to {:?}", path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`raster`] - Pixel buffers, draw primitives and image codecs
//! - [`filters`] - Static pixel filters and filter selection
//! - [`overlay`] - Live-preview particle animation
//! - [`strip`] - Strip layout, compositing and export
//! - [`session`] - Captures, frame sources and the booth orchestrator
//! - [`config`] - Configuration management
//!
//! ## Creating Custom Filters
//!
//! You can add filters to the registry by implementing the
//! [`PixelFilter`](filters::PixelFilter) trait:
//!
//! ```rust,no_run
//! use kalakini_booth::filters::{FilterRegistry, PixelFilter, StaticFilterKind};
//! use kalakini_booth::raster::RasterImage;
//!
//! struct Invert;
//!
//! impl PixelFilter for Invert {
//!     fn name(&self) -> &str {
//!         "invert"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Negative image"
//!     }
//!
//!     fn kind(&self) -> StaticFilterKind {
//!         StaticFilterKind::None
//!     }
//!
//!     fn apply_in_place(&self, image: &mut RasterImage) {
//!         for px in image.as_bytes_mut().chunks_exact_mut(4) {
//!             px[0] = 255 - px[0];
//!             px[1] = 255 - px[1];
//!             px[2] = 255 - px[2];
//!         }
//!     }
//! }
//!
//! let mut registry = FilterRegistry::new();
//! registry.register("invert".to_string(), || Box::new(Invert));
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod overlay;
pub mod raster;
pub mod session;
pub mod strip;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{BoothError, Result},
    filters::{FilterRegistry, FilterSelection, PixelFilter},
    raster::RasterImage,
    session::{Booth, PhotoSession},
    strip::StripCompositor,
};
