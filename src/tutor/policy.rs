use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which curriculum drives the session and which defaults apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    /// Flat shortcut list; a mistake restarts the whole set.
    #[default]
    Exercise,
    /// Levels with before/after scenes; a mistake retries the level.
    Level,
}

/// Where a failed attempt or a manual reset sends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetScope {
    #[default]
    WholeCurriculum,
    CurrentItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub reset_scope: ResetScope,
    pub success_dwell: Duration,
    pub error_dwell: Duration,
}

impl SessionPolicy {
    pub fn exercise() -> Self {
        Self {
            reset_scope: ResetScope::WholeCurriculum,
            success_dwell: Duration::from_millis(600),
            error_dwell: Duration::from_millis(800),
        }
    }

    pub fn level() -> Self {
        Self {
            reset_scope: ResetScope::CurrentItem,
            success_dwell: Duration::from_millis(2000),
            error_dwell: Duration::from_millis(500),
        }
    }

    pub fn for_flow(flow: Flow) -> Self {
        match flow {
            Flow::Exercise => Self::exercise(),
            Flow::Level => Self::level(),
        }
    }

    /// Target index for a reset from `current`.
    pub fn reset_target(&self, current: usize) -> usize {
        match self.reset_scope {
            ResetScope::WholeCurriculum => 0,
            ResetScope::CurrentItem => current,
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::exercise()
    }
}
