// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod audio;
pub mod config;
pub mod effects;
pub mod game;
pub mod highscore;
pub mod letters;
pub mod messages;
pub mod runtime;
pub mod scoring;
pub mod screen;
pub mod session;
pub mod ui;
