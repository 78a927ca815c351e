//! Single-session dialogue sequencer with a queued line list and a yes/no prompt.
use std::collections::VecDeque;

use bevy::prelude::*;

use crate::core::config::DialogueSettings;

use super::{
    reveal::Typewriter,
    types::{DialogueCallback, DialoguePhase, DialogueSignal, PromptCallback},
};

#[derive(Debug)]
struct DialogueSession {
    speaker: String,
    line: Typewriter,
    pending: VecDeque<String>,
    focus: Vec3,
    callback: Option<DialogueCallback>,
}

#[derive(Debug)]
struct PromptSession {
    message: String,
    focus: Vec3,
    callback: Option<PromptCallback>,
}

/// Owns the dialogue panel state. At most one session and one prompt exist.
///
/// Callers never receive callbacks directly; every continuation is buffered
/// as a [`DialogueSignal`] and published by `publish_dialogue_signals`.
#[derive(Resource, Debug)]
pub struct DialogueSequencer {
    typing_interval: f32,
    typewriter: bool,
    typing_sound_interval: f32,
    session: Option<DialogueSession>,
    prompt: Option<PromptSession>,
    signals: Vec<DialogueSignal>,
}

impl Default for DialogueSequencer {
    fn default() -> Self {
        Self::new(&DialogueSettings::default())
    }
}

impl DialogueSequencer {
    pub fn new(settings: &DialogueSettings) -> Self {
        Self {
            typing_interval: settings.typing_interval,
            typewriter: settings.typewriter,
            typing_sound_interval: settings.typing_sound_interval,
            session: None,
            prompt: None,
            signals: Vec::new(),
        }
    }

    /// Opens a single line. See [`Self::show_sequence`].
    pub fn show(
        &mut self,
        speaker: impl Into<String>,
        text: impl Into<String>,
        focus: Vec3,
        callback: Option<DialogueCallback>,
    ) {
        self.show_sequence(speaker, vec![text.into()], focus, callback);
    }

    /// Opens a session that plays `lines` in order, one advance at a time.
    ///
    /// An active session is force-completed first: its callback is published
    /// with `forced = true` and will not be published again. An empty line
    /// list completes `callback` immediately without opening the panel.
    pub fn show_sequence(
        &mut self,
        speaker: impl Into<String>,
        lines: Vec<String>,
        focus: Vec3,
        callback: Option<DialogueCallback>,
    ) {
        if let Some(previous) = self.session.take() {
            debug!(
                target: "dialogue",
                "Force-completing dialogue from {}",
                previous.speaker
            );
            if let Some(callback) = previous.callback {
                self.signals.push(DialogueSignal::Completed {
                    callback,
                    forced: true,
                });
            }
        }

        let mut pending: VecDeque<String> = lines.into();
        let Some(first) = pending.pop_front() else {
            if let Some(callback) = callback {
                self.signals.push(DialogueSignal::Completed {
                    callback,
                    forced: false,
                });
            }
            return;
        };

        let speaker = speaker.into();
        debug!(
            target: "dialogue",
            "{} opens dialogue ({} queued)",
            speaker,
            pending.len()
        );

        let line = self.start_line(first);
        self.session = Some(DialogueSession {
            speaker,
            line,
            pending,
            focus,
            callback,
        });
        self.signals.push(DialogueSignal::Opened { focus });
    }

    fn start_line(&mut self, text: String) -> Typewriter {
        let line = Typewriter::new(
            text,
            self.typing_interval,
            self.typewriter,
            self.typing_sound_interval,
        );
        if line.starts_with_blip() {
            self.signals.push(DialogueSignal::TypingBlip);
        }
        line
    }

    /// Handles the "next" input. Returns `false` when no session is open.
    ///
    /// While typing, the rest of the line is shown. Otherwise the next queued
    /// line starts, or the session closes and its callback is published.
    pub fn advance(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        if !session.line.is_complete() {
            session.line.finish();
            return true;
        }

        if let Some(next) = session.pending.pop_front() {
            let line = self.start_line(next);
            if let Some(session) = self.session.as_mut() {
                session.line = line;
            }
            return true;
        }

        self.close();
        true
    }

    fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        debug!(target: "dialogue", "{} closes dialogue", session.speaker);
        if self.prompt.is_none() {
            self.signals.push(DialogueSignal::Closed);
        }
        if let Some(callback) = session.callback {
            self.signals.push(DialogueSignal::Completed {
                callback,
                forced: false,
            });
        }
    }

    /// Opens the yes/no prompt. An unanswered prompt is resolved as declined.
    pub fn show_prompt(
        &mut self,
        message: impl Into<String>,
        focus: Vec3,
        callback: Option<PromptCallback>,
    ) {
        if let Some(previous) = self.prompt.take() {
            if let Some(callback) = previous.callback {
                self.signals.push(DialogueSignal::PromptResolved {
                    callback,
                    accepted: false,
                    forced: true,
                });
            }
        }

        self.prompt = Some(PromptSession {
            message: message.into(),
            focus,
            callback,
        });
        self.signals.push(DialogueSignal::Opened { focus });
    }

    /// Answers the open prompt. Returns `false` when none is open.
    pub fn respond(&mut self, accepted: bool) -> bool {
        let Some(prompt) = self.prompt.take() else {
            return false;
        };
        if self.session.is_none() {
            self.signals.push(DialogueSignal::Closed);
        }
        if let Some(callback) = prompt.callback {
            self.signals.push(DialogueSignal::PromptResolved {
                callback,
                accepted,
                forced: false,
            });
        }
        true
    }

    /// Advances the typewriter reveal of the current line.
    pub fn tick(&mut self, delta_seconds: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.line.tick(delta_seconds).blip {
            self.signals.push(DialogueSignal::TypingBlip);
        }
    }

    pub fn phase(&self) -> DialoguePhase {
        match &self.session {
            None => DialoguePhase::Idle,
            Some(session) if session.line.is_complete() => DialoguePhase::AwaitingAdvance,
            Some(_) => DialoguePhase::Typing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn speaker(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.speaker.as_str())
    }

    pub fn visible_text(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.line.visible_text())
    }

    pub fn full_text(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.line.full_text())
    }

    pub fn queued_lines(&self) -> usize {
        self.session
            .as_ref()
            .map(|session| session.pending.len())
            .unwrap_or(0)
    }

    pub fn focus_point(&self) -> Option<Vec3> {
        self.session
            .as_ref()
            .map(|session| session.focus)
            .or_else(|| self.prompt.as_ref().map(|prompt| prompt.focus))
    }

    /// Whether the open session or prompt was requested by `entity`.
    pub fn is_owned_by(&self, entity: Entity) -> bool {
        let session_owner = self
            .session
            .as_ref()
            .and_then(|session| session.callback)
            .map(DialogueCallback::owner);
        let prompt_owner = self
            .prompt
            .as_ref()
            .and_then(|prompt| prompt.callback)
            .map(|PromptCallback::Collect(owner)| owner);
        session_owner == Some(entity) || prompt_owner == Some(entity)
    }

    pub fn is_prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn prompt_message(&self) -> Option<&str> {
        self.prompt.as_ref().map(|prompt| prompt.message.as_str())
    }

    pub fn has_pending_signals(&self) -> bool {
        !self.signals.is_empty()
    }

    /// Takes every buffered signal in the order it was produced.
    pub fn drain_signals(&mut self) -> Vec<DialogueSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Drops the open session and prompt without publishing their continuations.
    pub fn clear(&mut self) {
        let session = self.session.take();
        let prompt = self.prompt.take();
        if session.is_some() || prompt.is_some() {
            self.signals.push(DialogueSignal::Closed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(index: u32) -> Entity {
        let mut world = World::new();
        let mut last = world.spawn_empty().id();
        for _ in 0..index {
            last = world.spawn_empty().id();
        }
        last
    }

    fn instant() -> DialogueSequencer {
        DialogueSequencer::new(&DialogueSettings {
            typewriter: false,
            ..Default::default()
        })
    }

    fn typing(interval: f32) -> DialogueSequencer {
        DialogueSequencer::new(&DialogueSettings {
            typewriter: true,
            typing_interval: interval,
            typing_sound_interval: 0.0,
            ..Default::default()
        })
    }

    fn completions(signals: &[DialogueSignal]) -> Vec<(DialogueCallback, bool)> {
        signals
            .iter()
            .filter_map(|signal| match signal {
                DialogueSignal::Completed { callback, forced } => Some((*callback, *forced)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn show_without_typewriter_awaits_advance() {
        let mut sequencer = instant();
        let npc = entity(1);
        sequencer.show("Luna", "Hi", Vec3::Y, Some(DialogueCallback::EndInteraction(npc)));

        assert_eq!(sequencer.phase(), DialoguePhase::AwaitingAdvance);
        assert_eq!(sequencer.visible_text(), Some("Hi"));
        assert_eq!(
            sequencer.drain_signals(),
            vec![DialogueSignal::Opened { focus: Vec3::Y }]
        );

        assert!(sequencer.advance());
        assert_eq!(sequencer.phase(), DialoguePhase::Idle);
        assert_eq!(
            sequencer.drain_signals(),
            vec![
                DialogueSignal::Closed,
                DialogueSignal::Completed {
                    callback: DialogueCallback::EndInteraction(npc),
                    forced: false
                }
            ]
        );
        assert!(!sequencer.advance());
        assert!(sequencer.drain_signals().is_empty());
    }

    #[test]
    fn advance_while_typing_reveals_full_text_first() {
        let mut sequencer = typing(0.5);
        sequencer.show("Luna", "Hello", Vec3::ZERO, None);
        assert_eq!(sequencer.phase(), DialoguePhase::Typing);
        assert_eq!(sequencer.visible_text(), Some("H"));

        assert!(sequencer.advance());
        assert_eq!(sequencer.phase(), DialoguePhase::AwaitingAdvance);
        assert_eq!(sequencer.visible_text(), Some("Hello"));
        assert!(sequencer.is_active());
    }

    #[test]
    fn tick_reveals_until_awaiting_advance() {
        let mut sequencer = typing(0.1);
        sequencer.show("Luna", "abc", Vec3::ZERO, None);
        sequencer.tick(0.1);
        assert_eq!(sequencer.visible_text(), Some("ab"));
        sequencer.tick(0.1);
        assert_eq!(sequencer.phase(), DialoguePhase::AwaitingAdvance);
    }

    #[test]
    fn new_session_force_completes_previous_once() {
        let mut sequencer = instant();
        let first = entity(1);
        let second = entity(2);
        sequencer.show("A", "one", Vec3::ZERO, Some(DialogueCallback::EndInteraction(first)));
        sequencer.show("B", "two", Vec3::X, Some(DialogueCallback::EndInteraction(second)));

        let signals = sequencer.drain_signals();
        assert_eq!(
            completions(&signals),
            vec![(DialogueCallback::EndInteraction(first), true)]
        );
        assert_eq!(sequencer.speaker(), Some("B"));

        sequencer.advance();
        let signals = sequencer.drain_signals();
        assert_eq!(
            completions(&signals),
            vec![(DialogueCallback::EndInteraction(second), false)]
        );
    }

    #[test]
    fn queued_lines_play_in_order_then_complete() {
        let mut sequencer = instant();
        let npc = entity(3);
        sequencer.show_sequence(
            "Cat",
            vec!["one".into(), "two".into(), "three".into()],
            Vec3::ZERO,
            Some(DialogueCallback::OfferCollection(npc)),
        );

        let mut seen = vec![sequencer.full_text().unwrap().to_string()];
        while sequencer.queued_lines() > 0 {
            sequencer.advance();
            seen.push(sequencer.full_text().unwrap().to_string());
        }
        assert_eq!(seen, ["one", "two", "three"]);
        assert!(completions(&sequencer.drain_signals()).is_empty());

        sequencer.advance();
        assert_eq!(
            completions(&sequencer.drain_signals()),
            vec![(DialogueCallback::OfferCollection(npc), false)]
        );
    }

    #[test]
    fn empty_sequence_completes_immediately() {
        let mut sequencer = instant();
        let npc = entity(4);
        sequencer.show_sequence("Cat", Vec::new(), Vec3::ZERO, Some(DialogueCallback::EndInteraction(npc)));
        assert!(!sequencer.is_active());
        assert_eq!(
            sequencer.drain_signals(),
            vec![DialogueSignal::Completed {
                callback: DialogueCallback::EndInteraction(npc),
                forced: false
            }]
        );
    }

    #[test]
    fn prompt_resolves_exactly_once() {
        let mut sequencer = instant();
        let npc = entity(5);
        sequencer.show_prompt("Take it?", Vec3::Z, Some(PromptCallback::Collect(npc)));
        assert!(sequencer.is_prompt_open());
        assert_eq!(sequencer.prompt_message(), Some("Take it?"));
        sequencer.drain_signals();

        assert!(sequencer.respond(true));
        assert!(!sequencer.respond(false));
        assert_eq!(
            sequencer.drain_signals(),
            vec![
                DialogueSignal::Closed,
                DialogueSignal::PromptResolved {
                    callback: PromptCallback::Collect(npc),
                    accepted: true,
                    forced: false
                }
            ]
        );
    }

    #[test]
    fn replacing_prompt_declines_the_old_one() {
        let mut sequencer = instant();
        let old = entity(6);
        let new = entity(7);
        sequencer.show_prompt("Old?", Vec3::ZERO, Some(PromptCallback::Collect(old)));
        sequencer.show_prompt("New?", Vec3::ZERO, Some(PromptCallback::Collect(new)));

        let resolved: Vec<_> = sequencer
            .drain_signals()
            .into_iter()
            .filter(|signal| matches!(signal, DialogueSignal::PromptResolved { .. }))
            .collect();
        assert_eq!(
            resolved,
            vec![DialogueSignal::PromptResolved {
                callback: PromptCallback::Collect(old),
                accepted: false,
                forced: true
            }]
        );
        assert_eq!(sequencer.prompt_message(), Some("New?"));
    }

    #[test]
    fn typing_emits_blips() {
        let mut sequencer = typing(0.1);
        sequencer.show("Luna", "abc", Vec3::ZERO, None);
        sequencer.tick(0.1);
        let blips = sequencer
            .drain_signals()
            .into_iter()
            .filter(|signal| *signal == DialogueSignal::TypingBlip)
            .count();
        assert_eq!(blips, 2);
    }

    #[test]
    fn clear_drops_continuations() {
        let mut sequencer = instant();
        let npc = entity(9);
        sequencer.show("Cat", "Meow", Vec3::ZERO, Some(DialogueCallback::EndInteraction(npc)));
        sequencer.show_prompt("Take it?", Vec3::ZERO, Some(PromptCallback::Collect(npc)));
        sequencer.drain_signals();

        sequencer.clear();
        assert!(!sequencer.is_active());
        assert!(!sequencer.is_prompt_open());
        assert_eq!(sequencer.drain_signals(), vec![DialogueSignal::Closed]);

        sequencer.clear();
        assert!(!sequencer.has_pending_signals());
    }

    #[test]
    fn focus_is_released_only_when_both_panels_close() {
        let mut sequencer = instant();
        let npc = entity(10);
        sequencer.show("Cat", "Meow", Vec3::ZERO, Some(DialogueCallback::EndInteraction(npc)));
        sequencer.show_prompt("Take it?", Vec3::ZERO, Some(PromptCallback::Collect(npc)));
        sequencer.drain_signals();

        sequencer.respond(false);
        assert!(!sequencer
            .drain_signals()
            .contains(&DialogueSignal::Closed));

        sequencer.advance();
        assert!(sequencer
            .drain_signals()
            .contains(&DialogueSignal::Closed));
    }

    #[test]
    fn ownership_follows_open_session_and_prompt() {
        let mut sequencer = instant();
        let cat = entity(11);
        let dog = entity(12);
        assert!(!sequencer.is_owned_by(cat));

        sequencer.show("Cat", "Meow", Vec3::ZERO, Some(DialogueCallback::OfferCollection(cat)));
        assert!(sequencer.is_owned_by(cat));
        assert!(!sequencer.is_owned_by(dog));

        sequencer.advance();
        sequencer.show_prompt("Take the dog?", Vec3::ZERO, Some(PromptCallback::Collect(dog)));
        assert!(!sequencer.is_owned_by(cat));
        assert!(sequencer.is_owned_by(dog));
    }
}
