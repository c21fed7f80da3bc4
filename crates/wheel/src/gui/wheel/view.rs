use super::{CairoMetrics, cairo_weight};
use crate::config::Typography;
use cairo::{Context, FontSlant, FontWeight};
use gyre::{DrawOp, GlyphPlacement, HexColor, LabelText, Wheel};
use palette::Srgba;
use std::f64::consts::PI;

struct Painter<'a> {
    cr: &'a Context,
    family: &'a str,
    segment_weight: FontWeight,
    label_weight: FontWeight,
}

impl<'a> Painter<'a> {
    fn new(cr: &'a Context, typography: &'a Typography) -> Self {
        Self {
            cr,
            family: typography.family.as_str(),
            segment_weight: cairo_weight(typography.segment_weight),
            label_weight: cairo_weight(typography.label_weight),
        }
    }

    fn draw(&self, op: &DrawOp) -> Result<(), cairo::Error> {
        match op {
            DrawOp::FillCircle {
                radius,
                rotation,
                color,
                ..
            } => self.draw_disc(*radius, *rotation, *color),
            DrawOp::Glyph {
                glyph,
                color,
                font_size,
            } => self.draw_glyph(glyph, *color, *font_size),
            DrawOp::CenterLabel {
                text,
                color,
                font_size,
            } => self.draw_label(text, *color, *font_size),
        }
    }

    fn set_color(&self, color: HexColor) {
        let (r, g, b, a) = color.to_rgba().into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn draw_disc(&self, radius: f64, rotation: f64, color: HexColor) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.rotate(rotation);
        self.set_color(color);
        self.cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
        self.cr.fill()?;
        self.cr.restore()
    }

    fn draw_glyph(
        &self,
        glyph: &GlyphPlacement,
        color: HexColor,
        font_size: f64,
    ) -> Result<(), cairo::Error> {
        let mut buf = [0u8; 4];
        let text = glyph.ch.encode_utf8(&mut buf);

        self.set_color(color);
        self.cr
            .select_font_face(self.family, FontSlant::Normal, self.segment_weight);
        self.cr.set_font_size(font_size);
        let ext = self.cr.text_extents(text)?;

        // glyph sits above the origin at (0, -radius) in the rotated frame
        self.cr.save()?;
        self.cr.rotate(glyph.upright());
        self.cr.move_to(
            -ext.x_advance() / 2.0,
            -glyph.radius - (ext.y_bearing() + ext.height() / 2.0),
        );
        self.cr.show_text(text)?;
        self.cr.restore()
    }

    fn draw_label(
        &self,
        text: &LabelText,
        color: HexColor,
        font_size: f64,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr
            .select_font_face(self.family, FontSlant::Normal, self.label_weight);
        self.cr.set_font_size(font_size);
        let ext = self.cr.text_extents(text.as_str())?;
        self.cr.move_to(
            -ext.x_advance() / 2.0,
            -(ext.y_bearing() + ext.height() / 2.0),
        );
        self.cr.show_text(text.as_str())
    }
}

/// Paints `background`, then the wheel's current frame centered in its viewport.
pub fn draw(
    cr: &Context,
    wheel: &Wheel,
    typography: &Typography,
    background: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = background.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.paint()?;

    let viewport = wheel.viewport();
    cr.save()?;
    cr.translate(viewport.center.x, viewport.center.y);
    cr.scale(viewport.scale, viewport.scale);

    let metrics = CairoMetrics::new(
        cr,
        typography.family.as_str(),
        cairo_weight(typography.segment_weight),
    );
    let painter = Painter::new(cr, typography);
    for op in wheel.frame(&metrics) {
        painter.draw(&op)?;
    }
    cr.restore()
}
