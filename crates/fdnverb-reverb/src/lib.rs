//! fdnverb Reverb - Feedback-delay-network late reverberator
//!
//! Turns a mono send bus into a continuous stereo reverb tail. The engine is
//! a network of 8 or 12 modulated, damped delay lines coupled through an
//! energy-preserving feedback matrix:
//!
//! - [`ReverbModel`] - Parameter mapping and the per-block entry points
//! - [`FeedbackNetwork`] - Delay lines, feedback matrix, tone correction and
//!   stereo output gains
//! - [`ReverbParams`] / [`ParamMask`] - The four user parameters and partial
//!   update mask
//! - [`ReverbConfig`] - Construction-time choices (line count, roomsize
//!   response, modulation)
//!
//! ## Example
//!
//! ```rust
//! use fdnverb_reverb::{ParamMask, ReverbModel, ReverbParams};
//!
//! let mut reverb = ReverbModel::new(48000.0)?;
//! reverb.set_parameters(
//!     &ReverbParams { roomsize: 0.6, damping: 0.3, width: 1.0, level: 0.8 },
//!     ParamMask::ALL,
//! );
//!
//! let input = [0.0f32; 64];
//! let mut left = [0.0f32; 64];
//! let mut right = [0.0f32; 64];
//! reverb.process_replace(&input, &mut left, &mut right);
//! # Ok::<(), fdnverb_reverb::ReverbError>(())
//! ```
//!
//! ## Real-time Contract
//!
//! `process_replace` and `process_mix` never allocate, block, or log.
//! Parameter updates and processing must not run concurrently on one
//! instance: drain parameter changes between blocks on the audio thread.
//! Sample-rate changes reallocate every delay line and belong outside the
//! audio callback.

pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod params;
pub mod tables;

pub use config::{LineCount, ReverbConfig, RoomsizeResponse};
pub use error::ReverbError;
pub use model::{Coefficients, LineCoefficients, ReverbModel};
pub use network::FeedbackNetwork;
pub use params::{ParamMask, ReverbParams};

pub use fdnverb_core::StereoSend;
