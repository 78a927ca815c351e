// src/ui/dialogue_panel/mod.rs
//
// Dialogue panel and yes/no prompt panel driven by the dialogue sequencer.

pub mod components;
pub mod systems;
