// src/ui/menu/components.rs
//
// Main menu markers and the animation clock driving them.

use bevy::prelude::*;

const FADE_SECONDS: f32 = 1.0;
const TITLE_FLOAT_SPEED: f32 = 3.0;
const TITLE_FLOAT_PIXELS: f32 = 10.0;
const PULSE_PERIOD: f32 = 1.5;
const PULSE_MIN_ALPHA: f32 = 0.5;

/// Root of the title screen, owning its animation clock.
#[derive(Component, Debug, Default)]
pub struct MainMenuScreen {
    elapsed: f32,
    leaving: Option<f32>,
}

/// Title text floating up and down around `base_top`.
#[derive(Component, Debug)]
pub struct MenuTitle {
    pub base_top: f32,
}

/// "Press Space" prompt that pulses.
#[derive(Component, Debug)]
pub struct StartPrompt;

/// Any other menu text that only fades.
#[derive(Component, Debug)]
pub struct MenuText;

/// Everything the menu needs to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuFrame {
    pub alpha: f32,
    pub title_offset: f32,
    pub prompt_alpha: f32,
    pub finished: bool,
}

impl MainMenuScreen {
    /// Starts the fade-out. Repeated presses do not restart it.
    pub fn start_leaving(&mut self) -> bool {
        if self.leaving.is_some() {
            return false;
        }
        self.leaving = Some(0.0);
        true
    }

    pub fn tick(&mut self, delta_seconds: f32) -> MenuFrame {
        let delta = delta_seconds.max(0.0);
        self.elapsed += delta;
        if let Some(leaving) = self.leaving.as_mut() {
            *leaving += delta;
        }

        let fade_in = (self.elapsed / FADE_SECONDS).min(1.0);
        let fade_out = self
            .leaving
            .map(|leaving| 1.0 - (leaving / FADE_SECONDS).min(1.0))
            .unwrap_or(1.0);
        let alpha = fade_in * fade_out;

        MenuFrame {
            alpha,
            title_offset: (self.elapsed * TITLE_FLOAT_SPEED).sin() * TITLE_FLOAT_PIXELS,
            prompt_alpha: pulse_alpha(self.elapsed) * alpha,
            finished: self.leaving.is_some_and(|leaving| leaving >= FADE_SECONDS),
        }
    }
}

/// Opacity cycling 1 -> 0.5 -> 1 every [`PULSE_PERIOD`] seconds.
pub fn pulse_alpha(elapsed: f32) -> f32 {
    let half = PULSE_PERIOD * 0.5;
    let phase = elapsed.rem_euclid(PULSE_PERIOD);
    if phase < half {
        1.0 + (PULSE_MIN_ALPHA - 1.0) * (phase / half)
    } else {
        PULSE_MIN_ALPHA + (1.0 - PULSE_MIN_ALPHA) * ((phase - half) / half)
    }
}
