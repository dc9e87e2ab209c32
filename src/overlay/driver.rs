use std::time::Duration;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::debug;

use crate::overlay::animator::OverlayAnimator;
use crate::overlay::layer::OverlaySurface;

/// Monotonic time origin for an overlay session
#[derive(Debug, Clone, Copy)]
pub struct OverlayClock {
    origin: Instant,
}

impl OverlayClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock started
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Advance `animator` on a fixed tick for `duration`.
///
/// Runs on the caller's task, so ticks never interleave with other work
/// scheduled on the same single-threaded runtime. Returns the number of
/// particles emitted.
pub async fn drive_for<S: OverlaySurface>(
    animator: &mut OverlayAnimator<S>,
    clock: &OverlayClock,
    duration: Duration,
    tick_every: Duration,
) -> usize {
    let deadline = Instant::now() + duration;
    let mut ticker = interval(tick_every.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut emitted = 0;
    loop {
        ticker.tick().await;
        emitted += animator.tick(clock.now());
        if Instant::now() >= deadline {
            break;
        }
    }

    debug!(
        "Overlay driven for {}ms: {} emitted, {} live",
        duration.as_millis(),
        emitted,
        animator.surface().live_count()
    );
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSelection;
    use crate::overlay::layer::ParticleLayer;

    #[tokio::test(start_paused = true)]
    async fn test_drive_emits_on_schedule() {
        let clock = OverlayClock::start();
        let mut animator = OverlayAnimator::with_seed(ParticleLayer::new(), 3);
        animator.start(FilterSelection::Hearts, clock.now());

        let emitted = drive_for(
            &mut animator,
            &clock,
            Duration::from_secs(1),
            Duration::from_millis(16),
        )
        .await;

        // 300, 600 and 900ms after the initial heart
        assert_eq!(emitted, 3);
        assert_eq!(animator.surface().live_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_animator_emits_nothing() {
        let clock = OverlayClock::start();
        let mut animator = OverlayAnimator::with_seed(ParticleLayer::new(), 3);

        let emitted = drive_for(
            &mut animator,
            &clock,
            Duration::from_millis(500),
            Duration::from_millis(16),
        )
        .await;
        assert_eq!(emitted, 0);
    }
}
