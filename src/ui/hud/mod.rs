// src/ui/hud/mod.rs
//
// In-game HUD: the collected-animals counter.

pub mod components;
pub mod systems;
