pub mod config;
pub mod events;
pub mod gui;
pub mod snapshot;
pub mod sys;
