use anyhow::{Result, bail};
use log::{debug, info};

use crate::curriculum::{Curriculum, KeySequenceItem};
use crate::input::keys::RawKeyEvent;
use crate::input::matcher::{MatchOutcome, match_key};
use crate::input::normalizer::{KeyNormalizer, NormalizedKey};
use crate::tutor::{Dwell, DwellKind, SessionPolicy, Snapshot, Status};

/// What the session did with one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not listening, or a modifier pressed on its own.
    Ignored,
    Advanced { consumed: usize },
    /// The item was finished; the host schedules the dwell.
    Completed(Dwell),
    Failed(Dwell),
}

/// The exercise state machine.
///
/// The session walks the curriculum one item at a time. It listens only
/// while the status is `Waiting`; a success or error detaches the listener
/// and hands back a [`Dwell`] that the host feeds to [`Session::on_dwell`]
/// once its delay has elapsed. Every transition bumps `generation`, so a
/// dwell scheduled before a reset or a jump is recognised as stale.
#[derive(Debug)]
pub struct Session {
    curriculum: Curriculum,
    normalizer: KeyNormalizer,
    policy: SessionPolicy,

    index: usize,
    consumed: usize,
    status: Status,
    all_completed: bool,
    listening: bool,
    generation: u64,

    streak: usize,
    best_streak: usize,
    completed: usize,
    hint_visible: bool,
    last_key: Option<NormalizedKey>,
}

impl Session {
    pub fn new(curriculum: Curriculum, normalizer: KeyNormalizer, policy: SessionPolicy) -> Self {
        let mut session = Self {
            curriculum,
            normalizer,
            policy,
            index: 0,
            consumed: 0,
            status: Status::Waiting,
            all_completed: false,
            listening: false,
            generation: 0,
            streak: 0,
            best_streak: 0,
            completed: 0,
            hint_visible: false,
            last_key: None,
        };
        session.enter_item(0);
        session
    }

    pub fn current_item(&self) -> &KeySequenceItem {
        // A curriculum is never empty and `index` only takes in-range values.
        &self.curriculum.items()[self.index]
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn normalizer(&self) -> &KeyNormalizer {
        &self.normalizer
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    #[cfg(test)]
    pub fn is_all_completed(&self) -> bool {
        self.all_completed
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Entry point for key presses coming from a terminal, which reports a
    /// dead key and its letter as one composed character. The press is split
    /// back into the two keys the layout produces; once one of them finishes
    /// the item the rest would be ignored anyway.
    pub fn handle_terminal_key(&mut self, event: RawKeyEvent) -> KeyResponse {
        let keys = self
            .normalizer
            .split_composed(event, &self.current_item().keys, self.consumed);
        let mut response = KeyResponse::Ignored;
        for key in &keys {
            response = self.handle_key(key);
            if matches!(response, KeyResponse::Completed(_) | KeyResponse::Failed(_)) {
                break;
            }
        }
        response
    }

    pub fn handle_key(&mut self, event: &RawKeyEvent) -> KeyResponse {
        if !self.listening || event.is_lone_modifier() {
            return KeyResponse::Ignored;
        }

        let expected = &self.current_item().keys;
        let normalized = self.normalizer.normalize(event, expected);
        let outcome = match_key(&normalized.token, expected, self.consumed, event.modifiers);
        debug!(
            "Key {} ({}) at {}/{}: {:?}",
            normalized.token,
            normalized.combo,
            self.consumed,
            expected.len(),
            outcome
        );
        self.last_key = Some(normalized);

        match outcome {
            MatchOutcome::Advance(n) => {
                self.consumed += n;
                KeyResponse::Advanced {
                    consumed: self.consumed,
                }
            }
            MatchOutcome::Complete => {
                self.consumed = self.current_item().keys.len();
                KeyResponse::Completed(self.succeed())
            }
            MatchOutcome::NoMatch => KeyResponse::Failed(self.fail()),
        }
    }

    /// Applies a dwell that has elapsed. Returns whether it changed anything;
    /// stale dwells and dwells that no longer fit the status are dropped.
    pub fn on_dwell(&mut self, dwell: &Dwell) -> bool {
        if dwell.generation != self.generation {
            debug!(
                "Dropping stale {:?} dwell (generation {}, current {})",
                dwell.kind, dwell.generation, self.generation
            );
            return false;
        }

        match (dwell.kind, self.status) {
            (DwellKind::Advance, Status::Success) => {
                if self.index + 1 < self.curriculum.len() {
                    self.enter_item(self.index + 1);
                } else {
                    self.finish();
                }
                true
            }
            (DwellKind::Recover, Status::Error) => {
                let target = self.policy.reset_target(self.index);
                info!("Retrying from item {}", target);
                self.enter_item(target);
                true
            }
            (kind, status) => {
                debug!("Ignoring {:?} dwell while {:?}", kind, status);
                false
            }
        }
    }

    /// User-triggered reset. Follows the reset scope of the policy; the
    /// completed count only starts over together with the curriculum.
    pub fn reset(&mut self) {
        let target = self.policy.reset_target(self.index);
        info!("Reset to item {}", target);
        self.streak = 0;
        if target == 0 {
            self.completed = 0;
        }
        self.all_completed = false;
        self.enter_item(target);
    }

    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let Some(item) = self.curriculum.get(index) else {
            bail!(
                "Item {} is out of range (curriculum has {} items)",
                index,
                self.curriculum.len()
            );
        };
        info!("Jump to item {} '{}'", index, item.id);
        self.all_completed = false;
        self.enter_item(index);
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        self.jump_to(self.index + 1)
    }

    pub fn previous(&mut self) -> Result<()> {
        match self.index.checked_sub(1) {
            Some(index) => self.jump_to(index),
            None => bail!("Already at the first item"),
        }
    }

    pub fn toggle_hint(&mut self) {
        self.hint_visible = !self.hint_visible;
    }

    pub fn snapshot(&self) -> Snapshot {
        let item = self.current_item();
        Snapshot {
            index: self.index,
            total: self.curriculum.len(),
            item: item.clone(),
            consumed: self.consumed,
            status: self.status,
            all_completed: self.all_completed,
            listening: self.listening,
            streak: self.streak,
            best_streak: self.best_streak,
            completed: self.completed,
            last_token: self.last_key.as_ref().map(|key| key.token.clone()),
            last_combo: self.last_key.as_ref().map(|key| key.combo.clone()),
            hint_visible: self.hint_visible,
        }
    }

    fn succeed(&mut self) -> Dwell {
        self.status = Status::Success;
        self.listening = false;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        self.completed += 1;
        info!(
            "Item '{}' completed (streak {})",
            self.current_item().id,
            self.streak
        );
        self.dwell(DwellKind::Advance)
    }

    fn fail(&mut self) -> Dwell {
        self.status = Status::Error;
        self.listening = false;
        self.streak = 0;
        info!(
            "Item '{}' failed at key {}",
            self.current_item().id,
            self.consumed + 1
        );
        self.dwell(DwellKind::Recover)
    }

    fn dwell(&self, kind: DwellKind) -> Dwell {
        let delay = match kind {
            DwellKind::Advance => self.policy.success_dwell,
            DwellKind::Recover => self.policy.error_dwell,
        };
        Dwell {
            generation: self.generation,
            kind,
            delay,
        }
    }

    fn finish(&mut self) {
        self.generation += 1;
        self.all_completed = true;
        self.status = Status::Waiting;
        self.listening = false;
        info!("All {} items completed", self.curriculum.len());
    }

    fn enter_item(&mut self, index: usize) {
        self.generation += 1;
        self.index = index;
        self.consumed = 0;
        self.status = Status::Waiting;
        self.hint_visible = false;
        self.listening = true;
        debug!(
            "Waiting on item {} '{}' (generation {})",
            index,
            self.current_item().id,
            self.generation
        );
    }
}
