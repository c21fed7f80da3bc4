use anyhow::Context;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;
use wheel::config;
use wheel::gui::app::AppModel;
use wheel::snapshot;
use wheel::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "wheel", version, about, long_about = None)]
struct Cli {
    /// Ring table to load instead of the user config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Render a single frame to this PNG file and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Edge length of the snapshot in pixels
    #[arg(long, default_value_t = 800)]
    size: u32,

    /// Write the built-in ring table to the user config file and print its path
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    // The watcher compares against notify's absolute event paths.
    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_config_path)
        .transpose()?;

    let config = config::load_config(config_path.as_deref())
        .context("Failed to load ring configuration")?;
    let mut wheel = config
        .build_wheel()
        .context("Refusing to start with a malformed ring table")?;

    if let Some(path) = &cli.snapshot {
        return snapshot::write_png(&mut wheel, &config, cli.size, path);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Watch the file we loaded from, or where the user file would appear.
    match config_path.clone().map(Ok).unwrap_or_else(config::get_config_path) {
        Ok(path) => runtime::start_background_services(tx, path),
        Err(e) => log::warn!("Config hot reload disabled: {}", e),
    }

    // GTK must not see our own command line flags.
    let app = RelmApp::new("org.gyre.wheel").with_args(Vec::new());
    app.run::<AppModel>((wheel, config, config_path, rx));
    Ok(())
}
