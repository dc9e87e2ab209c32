//! # Overlay Animation
//!
//! Live-preview decorations (hearts, stars, sparkles). Purely cosmetic:
//! particles live on their own surface and are never drawn into captures
//! or the composed strip.
//!
//! The [`OverlayAnimator`] is a plain state machine advanced by
//! [`OverlayAnimator::tick`]; [`driver::drive_for`] ticks it from a tokio
//! interval when running for real.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use kalakini_booth::filters::FilterSelection;
//! use kalakini_booth::overlay::{OverlayAnimator, ParticleLayer};
//!
//! let mut animator = OverlayAnimator::new(ParticleLayer::new());
//! animator.start(FilterSelection::Hearts, Duration::ZERO);
//! animator.tick(Duration::from_secs(1));
//! animator.stop();
//! assert_eq!(animator.surface().particles().count(), 0);
//! ```

pub mod animator;
pub mod driver;
pub mod layer;
pub mod particle;

pub use animator::{AnimatorState, OverlayAnimator};
pub use driver::{drive_for, OverlayClock};
pub use layer::{OverlaySurface, ParticleLayer};
pub use particle::{EmissionSpec, OverlayParticle, ParticleId};
