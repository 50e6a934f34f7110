pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{alert, card, AlertKind};
pub use layouts::desktop::desktop_layout;
