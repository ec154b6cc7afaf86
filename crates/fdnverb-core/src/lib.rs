//! fdnverb Core - DSP primitives for feedback-delay-network reverberation
//!
//! This crate provides the building blocks the `fdnverb-reverb` engine wires
//! together, designed for real-time audio processing with zero allocation in
//! the audio path.
//!
//! # Core Abstractions
//!
//! ## Delay Lines
//!
//! - [`DelayBuffer`] - Circular buffer with independent read/write indices and
//!   an attached [`DampingFilter`]
//! - [`ModulatedDelayLine`] - Pitch-modulated, all-pass interpolated tap built
//!   on a [`DelayBuffer`] and a [`SineModulator`]
//!
//! ## Filters
//!
//! - [`DampingFilter`] - One-pole lowpass setting a line's decay gain and HF loss
//! - [`ToneCorrector`] - First-order input tone correction for the network
//!
//! ## Modulation
//!
//! - [`SineModulator`] - Two-history recurrence sinusoid (no per-sample trig)
//!
//! ## Processing Interface
//!
//! - [`StereoSend`] - Mono-in, stereo-out send effect with replace and mix
//!   entry points
//!
//! ## Utilities
//!
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - Decay relation: [`decay_gain`] / [`decay_time_from_gain`]
//! - Denormal bias: [`DC_OFFSET`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fdnverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use fdnverb_core::ModulatedDelayLine;
//!
//! // 601-sample line, 4 samples of modulation depth, modulator updated every 50 samples
//! let mut line = ModulatedDelayLine::try_new(601, 4, 50).unwrap();
//! line.set_modulation(1.0, 44100.0, 0.0);
//! line.set_damping(0.95, 0.0);
//!
//! let tap = line.read_damped();
//! line.push(tap * 0.5 + 1.0);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **Fallible construction**: Buffers are reserved with `try_reserve_exact`,
//!   so allocation failure is reported rather than aborting
//! - **No dependencies on std**: Pure `no_std` with `libm` for math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod damping;
pub mod delay;
pub mod math;
pub mod modulated_delay;
pub mod modulator;
pub mod send;
pub mod tone;

// Re-export main types at crate root
pub use damping::DampingFilter;
pub use delay::DelayBuffer;
pub use math::{DC_OFFSET, db_to_linear, decay_gain, decay_time_from_gain, linear_to_db};
pub use modulated_delay::{INTERP_SAMPLES, ModulatedDelayLine};
pub use modulator::SineModulator;
pub use send::StereoSend;
pub use tone::ToneCorrector;
