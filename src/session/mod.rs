//! # Booth Session
//!
//! Captures, the frame sources they come from, the [`PhotoSession`] that
//! composes them into a strip, and the [`Booth`] that ties the session,
//! the live overlay and the download together.

pub mod booth;
pub mod capture;
pub mod photo_session;
pub mod source;

pub use booth::Booth;
pub use capture::Capture;
pub use photo_session::{CaptureOutcome, PhotoSession, SessionEvent};
pub use source::{FrameSource, SequenceSource, StillFrameSource};
