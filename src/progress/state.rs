//! The process-wide progress resource and its persisted record.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{errors::ProgressError, store::KeyValueStore};

const RECOVERED_DESCRIPTION: &str = "Recovered from saved data";

/// An animal the player has taken in. Unique by `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedItem {
    pub kind: String,
    pub description: String,
    pub icon: Option<Handle<Image>>,
}

/// Flat record written under the save key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    pub collected_animal_types: Vec<String>,
    pub has_met_volunteer_chief: bool,
    pub game_completed: bool,
}

/// Collected animals plus the two milestones, saved after every mutation.
#[derive(Resource)]
pub struct ProgressStore {
    collected: Vec<CollectedItem>,
    met_volunteer_chief: bool,
    game_completed: bool,
    total_required: usize,
    save_key: String,
    backend: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Restores progress from `backend`. Unreadable data is logged and ignored.
    pub fn load(
        backend: Box<dyn KeyValueStore>,
        save_key: impl Into<String>,
        total_required: usize,
    ) -> Self {
        let mut store = Self {
            collected: Vec::new(),
            met_volunteer_chief: false,
            game_completed: false,
            total_required: total_required.max(1),
            save_key: save_key.into(),
            backend,
        };

        match store.read_record() {
            Ok(Some(record)) => store.apply_record(record),
            Ok(None) => {}
            Err(err) => warn!(target: "progress", "Starting with fresh progress: {}", err),
        }

        store
    }

    fn read_record(&self) -> Result<Option<SaveRecord>, ProgressError> {
        let Some(raw) = self.backend.get(&self.save_key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| ProgressError::corrupt(&self.save_key, err.to_string()))
    }

    fn apply_record(&mut self, record: SaveRecord) {
        for kind in record.collected_animal_types {
            if self.is_collected(&kind) {
                continue;
            }
            self.collected.push(CollectedItem {
                kind,
                description: RECOVERED_DESCRIPTION.to_string(),
                icon: None,
            });
        }
        self.met_volunteer_chief = record.has_met_volunteer_chief;
        self.game_completed = record.game_completed;
    }

    /// Snapshot of what would be written to the backend.
    pub fn record(&self) -> SaveRecord {
        SaveRecord {
            collected_animal_types: self.collected.iter().map(|item| item.kind.clone()).collect(),
            has_met_volunteer_chief: self.met_volunteer_chief,
            game_completed: self.game_completed,
        }
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.record())
            .map_err(ProgressError::from)
            .and_then(|json| self.backend.set(&self.save_key, json));
        if let Err(err) = result {
            warn!(target: "progress", "Failed to save progress: {}", err);
        }
    }

    /// Records an animal. Returns `false` when that kind was already collected.
    pub fn collect(
        &mut self,
        kind: impl Into<String>,
        description: impl Into<String>,
        icon: Option<Handle<Image>>,
    ) -> bool {
        let kind = kind.into();
        if self.is_collected(&kind) {
            return false;
        }

        info!(target: "progress", "Collected animal: {}", kind);
        self.collected.push(CollectedItem {
            kind,
            description: description.into(),
            icon,
        });
        self.save();
        true
    }

    pub fn is_collected(&self, kind: &str) -> bool {
        self.collected.iter().any(|item| item.kind == kind)
    }

    pub fn collected(&self) -> &[CollectedItem] {
        &self.collected
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn total_required(&self) -> usize {
        self.total_required
    }

    pub fn all_collected(&self) -> bool {
        self.collected.len() >= self.total_required
    }

    pub fn has_met_volunteer_chief(&self) -> bool {
        self.met_volunteer_chief
    }

    pub fn set_met_volunteer_chief(&mut self, value: bool) {
        self.met_volunteer_chief = value;
        self.save();
    }

    pub fn is_game_completed(&self) -> bool {
        self.game_completed
    }

    pub fn complete_game(&mut self) {
        self.game_completed = true;
        self.save();
    }

    /// Clears every item and milestone and deletes the persisted record.
    pub fn reset(&mut self) {
        self.collected.clear();
        self.met_volunteer_chief = false;
        self.game_completed = false;
        if let Err(err) = self.backend.remove(&self.save_key) {
            warn!(target: "progress", "Failed to clear saved progress: {}", err);
        }
        info!(target: "progress", "Progress reset");
    }
}
