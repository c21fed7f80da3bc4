use crate::config::FontWeight;

pub mod metrics;
pub mod view;

pub use metrics::CairoMetrics;
pub use view::draw;

pub const IDLE_CURSOR: &str = "grab";
pub const DRAG_CURSOR: &str = "grabbing";

/// Cairo's toy font API only knows normal and bold.
pub fn cairo_weight(weight: FontWeight) -> cairo::FontWeight {
    match weight {
        FontWeight::Normal => cairo::FontWeight::Normal,
        FontWeight::SemiBold | FontWeight::Bold => cairo::FontWeight::Bold,
    }
}
