use crate::gui::wheel::{DRAG_CURSOR, IDLE_CURSOR};
use gtk::prelude::*;
use gtk4 as gtk;

/// Open hand over the canvas, closed hand while a ring is held.
pub fn set_drag_cursor(widget: &impl IsA<gtk::Widget>, dragging: bool) {
    let name = if dragging { DRAG_CURSOR } else { IDLE_CURSOR };
    widget.set_cursor_from_name(Some(name));
}
