//! Curved text: places each character of a segment label along its ring so the
//! label reads as one continuous arc centered in the segment's slice.

use crate::geometry::Point;
use crate::ring::{LabelText, Ring};
use std::f64::consts::FRAC_PI_2;

/// Rotates segment 0 to start at 12 o'clock when the ring is unrotated.
pub const INITIAL_ALIGNMENT: f64 = -FRAC_PI_2;
/// Distance of each stacked line from the text radius, relative to font size.
pub const LINE_OFFSET_FACTOR: f64 = 0.7;

/// Font measurement supplied by the renderer.
pub trait TextMetrics {
    /// Advance width of `text` set at `font_size` pixels.
    fn measure(&self, text: &str, font_size: f64) -> f64;
}

/// Every character advances by the same width, whatever the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f64);

impl TextMetrics for FixedWidth {
    fn measure(&self, text: &str, _font_size: f64) -> f64 {
        text.chars().count() as f64 * self.0
    }
}

/// One character on its arc. `angle` uses the canvas convention (0 at
/// 3 o'clock, clockwise), so the glyph center sits at `radius` along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub angle: f64,
    pub radius: f64,
}

impl GlyphPlacement {
    pub fn position(&self) -> Point {
        Point::new(
            self.radius * self.angle.cos(),
            self.radius * self.angle.sin(),
        )
    }

    /// Rotation that keeps the glyph upright with its baseline tangent to the arc.
    pub fn upright(&self) -> f64 {
        self.angle + FRAC_PI_2
    }
}

pub fn segment_start(rotation: f64, index: usize, segment_arc: f64) -> f64 {
    INITIAL_ALIGNMENT + rotation + index as f64 * segment_arc
}

/// Baseline radius of each line of a segment, innermost first.
pub fn line_radii(text_radius: f64, font_size: f64, lines: usize) -> Vec<f64> {
    let offset = LINE_OFFSET_FACTOR * font_size;
    match lines {
        0 => Vec::new(),
        1 => vec![text_radius],
        _ => vec![text_radius - offset, text_radius + offset],
    }
}

/// Walks `text` across the slice starting at `start`, half a character at a
/// time so each glyph sits in the middle of its own angular slot.
pub fn layout_line(
    text: &str,
    radius: f64,
    start: f64,
    segment_arc: f64,
    font_size: f64,
    metrics: &impl TextMetrics,
) -> Vec<GlyphPlacement> {
    if radius <= 0.0 {
        return Vec::new();
    }

    let span = metrics.measure(text, font_size) / radius;
    let mut cursor = start + segment_arc / 2.0 - span / 2.0;
    let mut buf = [0u8; 4];

    text.chars()
        .map(|ch| {
            let half = metrics.measure(ch.encode_utf8(&mut buf), font_size) / radius / 2.0;
            cursor += half;
            let glyph = GlyphPlacement {
                ch,
                angle: cursor,
                radius,
            };
            cursor += half;
            glyph
        })
        .collect()
}

fn layout_segment(
    ring: &Ring,
    index: usize,
    lines: &[LabelText],
    segment_arc: f64,
    metrics: &impl TextMetrics,
) -> Vec<GlyphPlacement> {
    let start = segment_start(ring.rotation(), index, segment_arc);
    let radii = line_radii(ring.text_radius(), ring.font_size(), lines.len());

    lines
        .iter()
        .zip(radii)
        .flat_map(|(line, radius)| {
            layout_line(
                line.as_str(),
                radius,
                start,
                segment_arc,
                ring.font_size(),
                metrics,
            )
        })
        .collect()
}

/// Glyphs for every segment label of `ring` at its current rotation.
pub fn layout_ring(ring: &Ring, metrics: &impl TextMetrics) -> Vec<GlyphPlacement> {
    let Some(segment_arc) = ring.segment_arc() else {
        return Vec::new();
    };

    ring.segments()
        .iter()
        .enumerate()
        .flat_map(|(index, label)| layout_segment(ring, index, label.lines(), segment_arc, metrics))
        .collect()
}
