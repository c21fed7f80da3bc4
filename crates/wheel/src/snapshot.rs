use crate::config::Config;
use crate::gui::theme::ThemeColors;
use crate::gui::wheel;
use anyhow::Context as _;
use cairo::{Context, Format, ImageSurface};
use gyre::Wheel;
use std::path::Path;

/// Renders one frame of `wheel` into a square PNG of `size` pixels.
pub fn write_png(wheel: &mut Wheel, config: &Config, size: u32, path: &Path) -> anyhow::Result<()> {
    let edge = i32::try_from(size).context("Snapshot size too large")?;
    let surface = ImageSurface::create(Format::ARgb32, edge, edge)?;
    let cr = Context::new(&surface)?;

    wheel.resize(f64::from(size), f64::from(size), config.viewport.fill);
    wheel::draw(
        &cr,
        wheel,
        &config.typography,
        ThemeColors::fallback().background,
    )?;
    drop(cr);
    surface.flush();

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}x{} snapshot to {}", size, size, path.display());
    Ok(())
}
