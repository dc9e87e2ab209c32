use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::filters::{FilterSelection, OverlayKind};
use crate::overlay::layer::OverlaySurface;
use crate::overlay::particle::{EmissionSpec, OverlayParticle, ParticleId};

/// Lifecycle of the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running(OverlayKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimerEvent {
    /// Repeating emission; reschedules itself one period later
    Periodic,
    /// One-shot emission from the start-up burst
    Burst,
    Expire(ParticleId),
}

/// Ordered by due time, then by scheduling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Timer {
    due: Duration,
    seq: u64,
    event: TimerEvent,
}

/// Tick-driven scheduler for decorative overlay particles.
///
/// Time is an explicit offset from any fixed origin; the animator never
/// reads a clock. All emission and expiry happens inside [`tick`](Self::tick),
/// so mutations are serialized by whoever drives it.
pub struct OverlayAnimator<S> {
    surface: S,
    state: AnimatorState,
    spec: Option<EmissionSpec>,
    timers: BinaryHeap<Reverse<Timer>>,
    rng: SmallRng,
    next_seq: u64,
    next_particle: u64,
}

impl<S: OverlaySurface> OverlayAnimator<S> {
    pub fn new(surface: S) -> Self {
        Self::with_rng(surface, SmallRng::from_entropy())
    }

    /// Deterministic particle placement, for tests and reproducible previews
    pub fn with_seed(surface: S, seed: u64) -> Self {
        Self::with_rng(surface, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(surface: S, rng: SmallRng) -> Self {
        Self {
            surface,
            state: AnimatorState::Idle,
            spec: None,
            timers: BinaryHeap::new(),
            rng,
            next_seq: 0,
            next_particle: 0,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running(_))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Start animating the overlay for `selection`.
    ///
    /// Any running overlay is stopped first. Selections without an overlay
    /// (None and the static filters) leave the animator idle.
    pub fn start(&mut self, selection: FilterSelection, now: Duration) {
        self.stop();

        let Some(kind) = selection.overlay_kind() else {
            debug!("Filter '{}' has no overlay; animator stays idle", selection);
            return;
        };

        let spec = EmissionSpec::for_kind(kind);
        info!(
            "Starting {} overlay (every {}ms, burst of {})",
            kind,
            spec.period.as_millis(),
            spec.burst_count
        );

        for i in 0..spec.burst_count {
            self.schedule(now + spec.burst_stagger * i, TimerEvent::Burst);
        }
        self.schedule(now + spec.period, TimerEvent::Periodic);

        self.spec = Some(spec);
        self.state = AnimatorState::Running(kind);

        // The first burst particle is due right away
        self.tick(now);
    }

    /// Cancel emission and remove every live particle immediately.
    ///
    /// Safe to call at any time; stopping an idle animator changes nothing.
    pub fn stop(&mut self) {
        if let AnimatorState::Running(kind) = self.state {
            info!("Stopping {} overlay ({} particles live)", kind, self.surface.live_count());
        }
        self.timers.clear();
        self.surface.clear();
        self.spec = None;
        self.state = AnimatorState::Idle;
    }

    /// Run every timer due at or before `now`, in order.
    ///
    /// Returns the number of particles emitted.
    pub fn tick(&mut self, now: Duration) -> usize {
        let mut emitted = 0;

        while let Some(Reverse(timer)) = self.timers.peek().copied() {
            if timer.due > now {
                break;
            }
            self.timers.pop();

            match timer.event {
                TimerEvent::Periodic => {
                    if let Some(period) = self.spec.as_ref().map(|spec| spec.period) {
                        self.schedule(timer.due + period, TimerEvent::Periodic);
                    }
                    emitted += self.emit(timer.due) as usize;
                }
                TimerEvent::Burst => {
                    emitted += self.emit(timer.due) as usize;
                }
                TimerEvent::Expire(id) => {
                    self.surface.detach(id);
                }
            }
        }

        emitted
    }

    /// When the next timer fires, if any
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.peek().map(|Reverse(timer)| timer.due)
    }

    fn schedule(&mut self, due: Duration, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Reverse(Timer { due, seq, event }));
    }

    fn emit(&mut self, at: Duration) -> bool {
        let (AnimatorState::Running(kind), Some(spec)) = (self.state, self.spec.as_ref()) else {
            return false;
        };

        let lo = spec.animation.start().as_secs_f64();
        let hi = spec.animation.end().as_secs_f64();
        let animation = Duration::from_secs_f64(self.rng.gen_range(lo..=hi));

        let x = self.rng.gen::<f32>();
        let y = spec.random_vertical.then(|| self.rng.gen::<f32>());
        let variant = spec.variants.map(|n| self.rng.gen_range(1..=n));

        let id = ParticleId(self.next_particle);
        self.next_particle += 1;

        let particle = OverlayParticle {
            id,
            kind,
            glyph: spec.glyph,
            x,
            y,
            variant,
            animation,
            created_at: at,
            ttl: spec.ttl,
        };
        let expires_at = particle.expires_at();

        self.surface.attach(particle);
        self.schedule(expires_at, TimerEvent::Expire(id));
        true
    }
}
