//! Markers for level scenery.
use bevy::prelude::*;

/// The town's single directional light.
#[derive(Component, Debug, Default)]
pub struct PrimarySun;
