use crate::curriculum::{KeySequenceItem, Scene};
use crate::input::keys::KeyToken;
use crate::tutor::Status;

/// Read-only view of a session for the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub index: usize,
    pub total: usize,
    pub item: KeySequenceItem,
    pub consumed: usize,
    pub status: Status,
    pub all_completed: bool,
    pub listening: bool,
    pub streak: usize,
    pub best_streak: usize,
    pub completed: usize,
    pub last_token: Option<KeyToken>,
    pub last_combo: Option<String>,
    pub hint_visible: bool,
}

impl Snapshot {
    pub fn consumed_keys(&self) -> &[KeyToken] {
        let end = self.consumed.min(self.item.keys.len());
        &self.item.keys.keys[..end]
    }

    /// The key the session is waiting for, or the one that was missed.
    pub fn expected_key(&self) -> Option<&KeyToken> {
        self.item.keys.get(self.consumed)
    }

    /// Scenes switch to their end state while the success dwell runs.
    pub fn show_after(&self) -> bool {
        self.status == Status::Success
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.item.scene.as_ref()
    }

    pub fn progress(&self) -> f64 {
        if self.all_completed || self.total == 0 {
            return 1.0;
        }
        self.index as f64 / self.total as f64
    }

    pub fn feedback(&self) -> Option<String> {
        if self.all_completed {
            return Some(format!(
                "All {} items completed! Best streak: {}. Press F5 to start over.",
                self.total, self.best_streak
            ));
        }
        match self.status {
            Status::Success => Some("Correct!".to_string()),
            Status::Error => {
                let expected = self
                    .expected_key()
                    .map(|key| key.to_string())
                    .unwrap_or_default();
                let pressed = self
                    .last_token
                    .as_ref()
                    .map(|key| key.to_string())
                    .unwrap_or_default();
                Some(format!(
                    "Wrong key! Expected \"{}\", got \"{}\"",
                    expected, pressed
                ))
            }
            Status::Waiting if self.consumed == 0 => Some("Press the keys...".to_string()),
            Status::Waiting => None,
        }
    }
}
