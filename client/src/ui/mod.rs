//! UI module

pub mod menu;
pub mod styles;

pub use menu::MenuPlugin;
