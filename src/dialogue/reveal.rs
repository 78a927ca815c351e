//! Character-by-character text reveal advanced once per frame.

/// Progressive reveal of a single line of dialogue.
///
/// The first character is visible as soon as the line starts; one more
/// appears every `interval` seconds. Accumulated time carries over between
/// ticks so the reveal speed does not depend on the frame rate.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    char_count: usize,
    revealed: usize,
    interval: f32,
    accumulated: f32,
    sound_interval: f32,
    since_blip: f32,
}

/// What happened during one reveal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealStep {
    pub newly_revealed: usize,
    pub blip: bool,
}

impl Typewriter {
    /// Starts revealing `text`. With `enabled == false` (or a zero interval)
    /// the whole line is visible immediately.
    pub fn new(text: impl Into<String>, interval: f32, enabled: bool, sound_interval: f32) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        let instant = !enabled || interval <= 0.0;
        let revealed = if instant { char_count } else { char_count.min(1) };

        Self {
            text,
            char_count,
            revealed,
            interval,
            accumulated: 0.0,
            sound_interval: sound_interval.max(0.0),
            since_blip: 0.0,
        }
    }

    /// Whether the opening character should be voiced.
    pub fn starts_with_blip(&self) -> bool {
        self.revealed > 0 && self.revealed < self.char_count
    }

    pub fn tick(&mut self, delta_seconds: f32) -> RevealStep {
        if self.is_complete() {
            return RevealStep::default();
        }

        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.accumulated += delta;
        self.since_blip += delta;

        let before = self.revealed;
        while self.accumulated >= self.interval && self.revealed < self.char_count {
            self.accumulated -= self.interval;
            self.revealed += 1;
        }

        let newly_revealed = self.revealed - before;
        let blip = newly_revealed > 0 && self.since_blip >= self.sound_interval;
        if blip {
            self.since_blip = 0.0;
        }

        RevealStep {
            newly_revealed,
            blip,
        }
    }

    /// Shows the rest of the line at once.
    pub fn finish(&mut self) {
        self.revealed = self.char_count;
        self.accumulated = 0.0;
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.char_count
    }

    pub fn revealed_chars(&self) -> usize {
        self.revealed
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte_index, _)) => &self.text[..byte_index],
            None => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_reveal_shows_everything() {
        let writer = Typewriter::new("Hola", 0.03, false, 0.1);
        assert!(writer.is_complete());
        assert_eq!(writer.visible_text(), "Hola");
    }

    #[test]
    fn reveals_one_character_per_interval() {
        let mut writer = Typewriter::new("abcd", 0.1, true, 0.0);
        assert_eq!(writer.visible_text(), "a");

        writer.tick(0.05);
        assert_eq!(writer.visible_text(), "a");
        writer.tick(0.05);
        assert_eq!(writer.visible_text(), "ab");
        writer.tick(0.25);
        assert_eq!(writer.visible_text(), "abcd");
        assert!(writer.is_complete());
    }

    #[test]
    fn large_frame_does_not_overshoot() {
        let mut writer = Typewriter::new("hey", 0.03, true, 0.0);
        let step = writer.tick(10.0);
        assert_eq!(step.newly_revealed, 2);
        assert_eq!(writer.revealed_chars(), 3);
        assert_eq!(writer.tick(1.0), RevealStep::default());
    }

    #[test]
    fn multibyte_text_slices_on_char_boundaries() {
        let mut writer = Typewriter::new("¿Sí?", 0.1, true, 0.0);
        writer.tick(0.1);
        assert_eq!(writer.visible_text(), "¿S");
        writer.finish();
        assert_eq!(writer.visible_text(), "¿Sí?");
    }

    #[test]
    fn blips_are_throttled() {
        let mut writer = Typewriter::new("abcdefgh", 0.05, true, 0.08);
        let blips = (0..6).filter(|_| writer.tick(0.05).blip).count();
        assert_eq!(blips, 3);
    }

    #[test]
    fn empty_line_is_complete() {
        let writer = Typewriter::new("", 0.03, true, 0.1);
        assert!(writer.is_complete());
        assert!(!writer.starts_with_blip());
        assert_eq!(writer.visible_text(), "");
    }
}
