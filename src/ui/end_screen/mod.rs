// src/ui/end_screen/mod.rs
//
// Completion detection and the restart/continue screen.

pub mod components;
pub mod systems;
