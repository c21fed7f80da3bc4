use cairo::{Context, FontSlant, FontWeight};
use gyre::TextMetrics;

/// Measures text with the same face the painter will draw it in.
pub struct CairoMetrics<'a> {
    cr: &'a Context,
    family: &'a str,
    weight: FontWeight,
}

impl<'a> CairoMetrics<'a> {
    pub fn new(cr: &'a Context, family: &'a str, weight: FontWeight) -> Self {
        Self { cr, family, weight }
    }
}

impl TextMetrics for CairoMetrics<'_> {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        self.cr
            .select_font_face(self.family, FontSlant::Normal, self.weight);
        self.cr.set_font_size(font_size);
        match self.cr.text_extents(text) {
            Ok(ext) => ext.x_advance(),
            Err(e) => {
                log::warn!("Failed to measure {:?}: {}", text, e);
                0.0
            }
        }
    }
}
