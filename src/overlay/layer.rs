use std::time::Duration;

use crate::filters::OverlayKind;
use crate::overlay::particle::{EmissionSpec, OverlayParticle, ParticleId};
use crate::raster::{Canvas, DrawSurface, RasterImage, TextStyle};

/// Where the animator puts particles. Rendering is up to the implementor.
pub trait OverlaySurface {
    fn attach(&mut self, particle: OverlayParticle);

    /// Remove one particle; unknown ids are ignored
    fn detach(&mut self, id: ParticleId);

    /// Remove every particle
    fn clear(&mut self);

    fn live_count(&self) -> usize;
}

/// In-memory overlay surface that can draw itself over a preview frame
#[derive(Debug, Clone, Default)]
pub struct ParticleLayer {
    particles: Vec<OverlayParticle>,
}

impl ParticleLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> impl Iterator<Item = &OverlayParticle> {
        self.particles.iter()
    }

    /// Draw the live particles over a copy of `frame`.
    ///
    /// Hearts and stars float from the bottom edge to the top over their
    /// animation and fade as they rise; sparkles twinkle in place.
    pub fn render_preview(&self, frame: &RasterImage, now: Duration) -> RasterImage {
        let mut canvas = Canvas::from_image(frame.clone());
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        let base_size = (height / 10.0).max(16.0) as f32;

        for particle in self.particles.iter().filter(|p| p.is_alive_at(now)) {
            let progress = particle.progress(now) as f64;
            let spec = EmissionSpec::for_kind(particle.kind);

            let (size_px, center_y, opacity) = match particle.kind {
                OverlayKind::Hearts | OverlayKind::Stars => {
                    (base_size, height * (1.0 - progress), 1.0 - progress)
                }
                OverlayKind::Sparkles => {
                    let grow = particle.variant.unwrap_or(1) as f32;
                    let y = particle.y.unwrap_or(0.5) as f64 * height;
                    (base_size * (0.5 + grow / 2.0), y, 1.0 - (2.0 * progress - 1.0).abs())
                }
            };
            if opacity <= 0.0 {
                continue;
            }

            let style = TextStyle {
                size_px,
                color: spec.color.with_opacity(opacity as f32),
            };
            // Symbols sit roughly 0.7 em above the baseline
            let baseline = center_y + size_px as f64 * 0.35;
            canvas.draw_text(
                &particle.glyph.to_string(),
                particle.x as f64 * width,
                baseline,
                &style,
            );
        }

        canvas.into_image()
    }
}

impl OverlaySurface for ParticleLayer {
    fn attach(&mut self, particle: OverlayParticle) {
        self.particles.push(particle);
    }

    fn detach(&mut self, id: ParticleId) {
        self.particles.retain(|p| p.id != id);
    }

    fn clear(&mut self) {
        self.particles.clear();
    }

    fn live_count(&self) -> usize {
        self.particles.len()
    }
}
