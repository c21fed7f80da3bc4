//! Concentric, independently rotatable rings with curved segment labels.
//!
//! [`Wheel`] is the entry point: it owns the [`RingModel`] and the
//! [`RotationEngine`] and turns pointer input and frame ticks into a list of
//! [`DrawOp`]s for whatever renderer the host uses.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
mod macros;
pub mod render;
pub mod ring;
pub mod wheel;

pub use engine::{Easing, Interaction, PointerEvent, RotationEngine};
pub use error::{ColorError, ModelError};
pub use geometry::{Point, Viewport};
pub use layout::{FixedWidth, GlyphPlacement, TextMetrics};
pub use render::DrawOp;
pub use ring::{HexColor, Label, LabelText, Ring, RingId, RingModel, RingSpec};
pub use wheel::Wheel;
