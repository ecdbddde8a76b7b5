//! Input loading module
//! Handles file format detection and loading of candidate pools and requirements

pub mod file_detector;
pub mod manager;

pub use manager::InputManager;
