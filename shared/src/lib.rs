//! Shared voxel sandbox simulation
//!
//! Everything that decides what happens in the world lives here and runs
//! headless: player physics, look, the block editor and the frame loop that
//! orders them. The client adds rendering and device input on top.

pub mod blocks;
pub mod camera;
pub mod config;
pub mod editor;
pub mod frame;
pub mod input;
pub mod look;
pub mod movement;
pub mod physics;
pub mod player;
pub mod press;
pub mod raycast;

pub use blocks::{Block, BlockColor, BlockIndex};
pub use camera::{CameraLens, CAMERA_FAR, CAMERA_FOV_Y, CAMERA_NEAR};
pub use config::SandboxSettings;
pub use editor::{BlockPlaced, BlockRemoved};
pub use frame::{SandboxPlugin, SandboxSet};
pub use input::{InputEvent, InputState};
pub use look::LookAngles;
pub use movement::MovementIntent;
pub use player::{Player, PlayerCamera, PlayerState};
