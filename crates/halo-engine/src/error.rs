use halo_core::RingKind;
use thiserror::Error;

/// Construction-time failures of the engine.
///
/// Once an engine exists every per-frame lookup is guaranteed to be in
/// range, so [`crate::ClockEngine::step`] cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{ring} ring needs {expected} elements, got {found}")]
    ElementCount {
        ring: RingKind,
        expected: usize,
        found: usize,
    },
    #[error("{ring} ring element at position {position} has index {index}")]
    IndexMismatch {
        ring: RingKind,
        position: usize,
        index: usize,
    },
    #[error("curve needs at least one sample")]
    InvalidSplineSamples,
}
