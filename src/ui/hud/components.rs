// src/ui/hud/components.rs
//
// Counter state and its pop animation.

use bevy::prelude::*;

const POP_SCALE: f32 = 1.2;

/// Root node of the in-game HUD, visible only while playing.
#[derive(Component, Debug)]
pub struct HudRoot;

/// "Animals found" label. Pops whenever the count goes up.
#[derive(Component, Debug)]
pub struct CollectionCounter {
    shown: usize,
    base_font_size: f32,
    pop: Option<CounterPop>,
}

impl CollectionCounter {
    pub fn new(shown: usize, base_font_size: f32) -> Self {
        Self {
            shown,
            base_font_size,
            pop: None,
        }
    }

    /// Records a new count. Returns `true` when it grew and a pop started.
    pub fn observe(&mut self, found: usize, pop_seconds: f32) -> bool {
        let grew = found > self.shown;
        self.shown = found;
        if grew {
            self.pop = Some(CounterPop::new(pop_seconds));
        }
        grew
    }

    /// Font size for this frame, or `None` when no pop is running.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<f32> {
        let pop = self.pop.as_mut()?;
        let scale = pop.tick(delta_seconds);
        if pop.is_finished() {
            self.pop = None;
        }
        Some(self.base_font_size * scale)
    }
}

/// Scale up to 1.2 over the first half (ease out), back to 1 over the second (ease in).
#[derive(Debug, Clone, Copy)]
pub struct CounterPop {
    elapsed: f32,
    duration: f32,
}

impl CounterPop {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn tick(&mut self, delta_seconds: f32) -> f32 {
        self.elapsed = (self.elapsed + delta_seconds.max(0.0)).min(self.duration);
        self.scale()
    }

    pub fn scale(&self) -> f32 {
        let half = self.duration * 0.5;
        if self.elapsed < half {
            let p = self.elapsed / half;
            let eased = 1.0 - (1.0 - p) * (1.0 - p);
            1.0 + (POP_SCALE - 1.0) * eased
        } else {
            let p = ((self.elapsed - half) / half).min(1.0);
            POP_SCALE - (POP_SCALE - 1.0) * p * p
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

pub fn counter_label(found: usize, total: usize) -> String {
    format!("Animals found: {}/{}", found, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_peaks_midway_and_returns_to_rest() {
        let mut pop = CounterPop::new(0.5);
        assert!((pop.scale() - 1.0).abs() < 1e-6);
        pop.tick(0.25);
        assert!((pop.scale() - POP_SCALE).abs() < 1e-5);
        pop.tick(1.0);
        assert!(pop.is_finished());
        assert!((pop.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn only_increases_pop() {
        let mut counter = CollectionCounter::new(2, 24.0);
        assert!(!counter.observe(2, 0.5));
        assert_eq!(counter.tick(0.1), None);
        assert!(counter.observe(3, 0.5));
        assert!(counter.tick(0.1).unwrap() > 24.0);
        assert!(!counter.observe(0, 0.5));
    }

    #[test]
    fn label_format() {
        assert_eq!(counter_label(3, 9), "Animals found: 3/9");
    }
}
