//! Error types for reverb construction.

use std::collections::TryReserveError;
use thiserror::Error;

use crate::tables::MIN_SAMPLE_RATE;

/// Errors that can occur while building or resizing a reverb.
///
/// Processing and parameter updates never fail; only operations that
/// allocate delay memory return this type.
#[derive(Debug, Error)]
pub enum ReverbError {
    /// Sample rate was below 8 kHz or not finite
    #[error("invalid sample rate: {0} (expected at least 8000 Hz)")]
    InvalidSampleRate(f32),

    /// A delay buffer could not be reserved
    #[error("failed to allocate a delay buffer of {requested} samples: {source}")]
    Allocation {
        /// Samples requested for the buffer.
        requested: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },
}

impl ReverbError {
    /// Create an allocation error.
    pub fn allocation(requested: usize, source: TryReserveError) -> Self {
        ReverbError::Allocation { requested, source }
    }
}

/// Check that `sample_rate` can drive a network.
pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<f32, ReverbError> {
    if sample_rate.is_finite() && sample_rate >= MIN_SAMPLE_RATE {
        Ok(sample_rate)
    } else {
        Err(ReverbError::InvalidSampleRate(sample_rate))
    }
}
