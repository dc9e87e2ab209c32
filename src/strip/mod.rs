//! # Photo Strip
//!
//! Fixed three-slot vertical layout, the compositor that rasterizes captures
//! into it, and PNG export.
//!
//! Every strip is 600x1220 regardless of the source photos: each photo is
//! scaled to fit its 590x400 slot without cropping, centered, outlined, and a
//! caption is drawn near the bottom edge.

pub mod compositor;
pub mod export;
pub mod layout;

pub use compositor::StripCompositor;
pub use export::{save_strip, suggested_filename};
pub use layout::{SlotPlacement, StripLayout};
