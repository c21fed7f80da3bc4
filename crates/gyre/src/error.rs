use crate::ring::RingId;
use thiserror::Error;

/// Malformed wheel configuration, detected once when the model is built.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Wheel has no rings")]
    Empty,
    #[error("Ring ids must run 1..N in order: expected {expected}, found {found}")]
    NonContiguousId { expected: RingId, found: RingId },
    #[error("Ring {id} radius {radius} must exceed the previous ring's radius {previous}")]
    RadiusNotAscending {
        id: RingId,
        radius: f64,
        previous: f64,
    },
    #[error("Ring {id} segment {segment} has {lines} lines, expected 1 or 2")]
    LineCount {
        id: RingId,
        segment: usize,
        lines: usize,
    },
    #[error("Ring {id} radius must be finite, got {radius}")]
    NonFiniteRadius { id: RingId, radius: f64 },
    #[error("Ring {id} rotation must be finite, got {rotation}")]
    Rotation { id: RingId, rotation: f64 },
    #[error("Ring {id} text radius must be positive and finite, got {radius}")]
    TextRadius { id: RingId, radius: f64 },
    #[error("Ring {id} font size must be positive, got {size}")]
    FontSize { id: RingId, size: f64 },
    #[error("Ring {id} is static and cannot be draggable")]
    StaticDraggable { id: RingId },
    #[error("Easing factor must be in (0, 1], got {0}")]
    EasingFactor(f64),
    #[error("Snap threshold must be positive and finite, got {0}")]
    SnapThreshold(f64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized color {0:?}, expected a hex code or a CSS color name")]
pub struct ColorError(pub String);
