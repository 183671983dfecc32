use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellKind {
    /// After a success: move on to the next item.
    Advance,
    /// After a mistake: return to the reset target.
    Recover,
}

/// A scheduled follow-up transition.
///
/// `generation` is the session generation at scheduling time; a dwell whose
/// generation no longer matches is stale and must not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dwell {
    pub generation: u64,
    pub kind: DwellKind,
    pub delay: Duration,
}

/// Holds at most one pending dwell and resolves once its deadline passes.
#[derive(Debug, Default)]
pub struct DwellTimer {
    pending: Option<(Dwell, Instant)>,
}

impl DwellTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending dwell.
    pub fn schedule(&mut self, dwell: Dwell) {
        self.pending = Some((dwell, Instant::now() + dwell.delay));
    }

    pub fn cancel(&mut self) -> Option<Dwell> {
        self.pending.take().map(|(dwell, _)| dwell)
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Never resolves while nothing is scheduled. Cancel safe: dropping the
    /// future before the deadline keeps the dwell pending.
    pub async fn wait(&mut self) -> Dwell {
        let Some((_, deadline)) = self.pending else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((dwell, _)) => dwell,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dwell(generation: u64, millis: u64) -> Dwell {
        Dwell {
            generation,
            kind: DwellKind::Advance,
            delay: Duration::from_millis(millis),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_after_delay() {
        let mut timer = DwellTimer::new();
        timer.schedule(dwell(1, 600));
        let start = Instant::now();
        let fired = timer.wait().await;
        assert_eq!(fired.generation, 1);
        assert!(start.elapsed() >= Duration::from_millis(600));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let mut timer = DwellTimer::new();
        timer.schedule(dwell(1, 600));
        timer.schedule(dwell(2, 100));
        assert_eq!(timer.wait().await.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let mut timer = DwellTimer::new();
        timer.schedule(dwell(1, 100));
        assert_eq!(timer.cancel().map(|d| d.generation), Some(1));
        let result = tokio::time::timeout(Duration::from_secs(5), timer.wait()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_dwell() {
        let mut timer = DwellTimer::new();
        timer.schedule(dwell(3, 1000));
        let early = tokio::time::timeout(Duration::from_millis(10), timer.wait()).await;
        assert!(early.is_err());
        assert!(timer.is_pending());
        assert_eq!(timer.wait().await.generation, 3);
    }
}
