pub mod formatters;
pub mod renderers;
pub mod views;

pub use renderers::ConsoleRenderer;
