// src/ui/mod.rs
//
// Screen-space UI: dialogue and prompt panels, the collection counter, the
// main menu and the end screen.

pub mod dialogue_panel;
pub mod end_screen;
pub mod hud;
pub mod menu;
pub mod plugin;
pub mod widgets;

pub use plugin::UiPlugin;
