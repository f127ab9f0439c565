//! Client-side game systems
//!
//! Organized into submodules for maintainability.

mod rendering;
mod world;

// Re-export everything for easy access from main.rs
pub use rendering::*;
pub use world::*;
