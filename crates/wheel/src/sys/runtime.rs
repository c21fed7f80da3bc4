use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the config file watcher on its own Tokio runtime, off the GTK thread.
pub fn start_background_services(tx: Sender<AppEvent>, config_path: PathBuf) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            let watcher = tokio::spawn(crate::config::run_async_watcher(config_path, tx));
            if let Err(e) = watcher.await {
                log::error!("Config watcher stopped: {}", e);
            }
        });
    });
}
