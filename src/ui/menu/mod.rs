// src/ui/menu/mod.rs
//
// Title screen shown before play starts.

pub mod components;
pub mod systems;
