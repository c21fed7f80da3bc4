use crate::layout::{self, GlyphPlacement, TextMetrics};
use crate::ring::{HexColor, LabelText, RingId, RingModel};

/// A single drawing step in wheel space (origin at the shared center).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Solid disc; drawn outermost first so inner rings cover the middle.
    FillCircle {
        ring: RingId,
        radius: f64,
        rotation: f64,
        color: HexColor,
    },
    /// One character, upright relative to its arc.
    Glyph {
        glyph: GlyphPlacement,
        color: HexColor,
        font_size: f64,
    },
    /// Horizontal text centered on the origin, unaffected by rotation.
    CenterLabel {
        text: LabelText,
        color: HexColor,
        font_size: f64,
    },
}

/// Draw instructions for one frame, back to front.
pub fn compose(model: &RingModel, metrics: &impl TextMetrics) -> Vec<DrawOp> {
    let mut ops = Vec::new();

    for ring in model.rings().iter().rev() {
        ops.push(DrawOp::FillCircle {
            ring: ring.id(),
            radius: ring.radius(),
            rotation: ring.rotation(),
            color: ring.color(),
        });

        if let Some(text) = ring.label() {
            ops.push(DrawOp::CenterLabel {
                text: text.clone(),
                color: ring.text_color(),
                font_size: ring.font_size(),
            });
        }

        ops.extend(
            layout::layout_ring(ring, metrics)
                .into_iter()
                .map(|glyph| DrawOp::Glyph {
                    glyph,
                    color: ring.text_color(),
                    font_size: ring.font_size(),
                }),
        );
    }
    ops
}
