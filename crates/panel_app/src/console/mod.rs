mod app;
mod commands;
mod effects;
mod logging;
mod render;

pub use app::run;
