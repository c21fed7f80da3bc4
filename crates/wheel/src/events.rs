#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The ring table file changed on disk.
    ConfigReload,
}
