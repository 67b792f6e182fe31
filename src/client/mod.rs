pub mod core;
pub mod gui;
pub mod main;
pub mod render;
pub mod run_effect;
