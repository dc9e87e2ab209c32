use std::ops::RangeInclusive;
use std::time::Duration;

use crate::filters::OverlayKind;
use crate::raster::Color;

/// Identifier handed to the surface so it can drop a particle later
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u64);

/// One decorative element floating over the live preview.
///
/// Positions are fractions of the preview size so the same particle can be
/// drawn on any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayParticle {
    pub id: ParticleId,
    pub kind: OverlayKind,
    pub glyph: char,
    /// Horizontal position, 0.0 (left) to 1.0 (right)
    pub x: f32,
    /// Vertical position for stationary particles; rising particles have none
    pub y: Option<f32>,
    /// Twinkle style 1..=4, sparkles only
    pub variant: Option<u8>,
    /// How long the float / twinkle animation runs
    pub animation: Duration,
    pub created_at: Duration,
    /// Removal happens at `created_at + ttl`
    pub ttl: Duration,
}

impl OverlayParticle {
    pub fn expires_at(&self) -> Duration {
        self.created_at + self.ttl
    }

    pub fn is_alive_at(&self, now: Duration) -> bool {
        now >= self.created_at && now < self.expires_at()
    }

    /// Animation progress at `now`, 0.0 to 1.0
    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.created_at).as_secs_f32();
        let total = self.animation.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (elapsed / total).clamp(0.0, 1.0)
    }
}

/// Emission constants for one overlay kind
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionSpec {
    pub glyph: char,
    /// Time between periodic emissions
    pub period: Duration,
    /// Uniform range of per-particle animation durations
    pub animation: RangeInclusive<Duration>,
    /// Fixed time until a particle is removed
    pub ttl: Duration,
    /// Particles emitted by `start`, the first one immediately
    pub burst_count: u32,
    /// Delay between consecutive burst particles
    pub burst_stagger: Duration,
    /// Stationary particles get a random vertical position
    pub random_vertical: bool,
    /// Number of twinkle styles to pick from, if any
    pub variants: Option<u8>,
    /// Tint used when rendering a preview
    pub color: Color,
}

impl EmissionSpec {
    pub fn for_kind(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::Hearts => Self {
                glyph: '💕',
                period: Duration::from_millis(300),
                animation: Duration::from_secs(2)..=Duration::from_secs(4),
                ttl: Duration::from_secs(4),
                burst_count: 1,
                burst_stagger: Duration::ZERO,
                random_vertical: false,
                variants: None,
                color: Color::rgb(0xFF, 0x6B, 0x9D),
            },
            OverlayKind::Stars => Self {
                glyph: '⭐',
                period: Duration::from_millis(400),
                animation: Duration::from_secs(3)..=Duration::from_secs(5),
                ttl: Duration::from_secs(5),
                burst_count: 1,
                burst_stagger: Duration::ZERO,
                random_vertical: false,
                variants: None,
                color: Color::rgb(0xFF, 0xD7, 0x00),
            },
            OverlayKind::Sparkles => Self {
                glyph: '✨',
                period: Duration::from_millis(200),
                animation: Duration::from_millis(1500)..=Duration::from_millis(2500),
                ttl: Duration::from_secs(3),
                burst_count: 5,
                burst_stagger: Duration::from_millis(200),
                random_vertical: true,
                variants: Some(4),
                color: Color::rgb(0xFF, 0xF8, 0xDC),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_covers_longest_animation() {
        for kind in [OverlayKind::Hearts, OverlayKind::Stars, OverlayKind::Sparkles] {
            let spec = EmissionSpec::for_kind(kind);
            assert!(spec.ttl >= *spec.animation.end(), "{}", kind);
            assert!(spec.period > Duration::ZERO);
        }
    }

    #[test]
    fn test_sparkle_burst_lands_in_first_second() {
        let spec = EmissionSpec::for_kind(OverlayKind::Sparkles);
        let last = spec.burst_stagger * (spec.burst_count - 1);
        assert!(last < Duration::from_secs(1));
    }

    #[test]
    fn test_particle_lifetime() {
        let particle = OverlayParticle {
            id: ParticleId(1),
            kind: OverlayKind::Hearts,
            glyph: '💕',
            x: 0.5,
            y: None,
            variant: None,
            animation: Duration::from_secs(2),
            created_at: Duration::from_secs(1),
            ttl: Duration::from_secs(4),
        };

        assert!(!particle.is_alive_at(Duration::from_millis(999)));
        assert!(particle.is_alive_at(Duration::from_secs(1)));
        assert!(particle.is_alive_at(Duration::from_millis(4999)));
        assert!(!particle.is_alive_at(Duration::from_secs(5)));
        assert_eq!(particle.progress(Duration::from_secs(2)), 0.5);
        assert_eq!(particle.progress(Duration::from_secs(4)), 1.0);
    }
}
