//! Ambient particles drifting over the backdrop.

use std::cell::RefCell;
use std::rc::Rc;

use calma_config::ParticleConfig;
use calma_core::{Rgb, ease_in_out_cubic, lerp};

use crate::dom::{Document, ElementId};
use crate::timer::{Scheduler, TimerHandle};

/// Side length of a particle in CSS pixels.
const PARTICLE_SIZE: &str = "3px";

/// Opacity at the middle of a pulse, relative to the resting opacity.
const PULSE_LOW: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSettings {
    pub interval_ms: u64,
    pub lifetime_ms: u64,
    pub color: Rgb,
    pub max_alpha: f64,
    pub pulse_min_s: f64,
    pub pulse_spread_s: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self::from(&ParticleConfig::default())
    }
}

impl From<&ParticleConfig> for ParticleSettings {
    fn from(config: &ParticleConfig) -> Self {
        Self {
            interval_ms: config.interval_ms,
            lifetime_ms: config.lifetime_ms,
            color: config.color,
            max_alpha: config.max_alpha,
            pulse_min_s: config.pulse_min_s,
            pulse_spread_s: config.pulse_spread_s,
        }
    }
}

/// A live particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub element: ElementId,
    /// Horizontal position, percent of the viewport width.
    pub left_pct: f64,
    /// Vertical position, percent of the viewport height.
    pub top_pct: f64,
    /// Resting opacity of the fill color.
    pub alpha: f64,
    /// Period of the pulse animation in seconds.
    pub pulse_s: f64,
    pub born_ms: u64,
}

impl Particle {
    /// Opacity at `now_ms` under the `pulse` keyframes: full, half, full,
    /// each half eased in and out.
    pub fn pulse_alpha(&self, now_ms: u64) -> f64 {
        if self.pulse_s <= 0.0 {
            return self.alpha;
        }
        let elapsed_s = now_ms.saturating_sub(self.born_ms) as f64 / 1000.0;
        let t = (elapsed_s / self.pulse_s).fract();
        let factor = if t < 0.5 {
            lerp(1.0, PULSE_LOW, ease_in_out_cubic(t * 2.0))
        } else {
            lerp(PULSE_LOW, 1.0, ease_in_out_cubic((t - 0.5) * 2.0))
        };
        self.alpha * factor
    }

    fn apply_style(&self, doc: &mut Document, color: Rgb) {
        let Some(el) = doc.element_mut(self.element) else {
            return;
        };
        el.set_style("position", "fixed");
        el.set_style("width", PARTICLE_SIZE);
        el.set_style("height", PARTICLE_SIZE);
        el.set_style("border-radius", "50%");
        el.set_style("background", color.css_alpha(self.alpha));
        el.set_style("left", format!("{}%", self.left_pct));
        el.set_style("top", format!("{}%", self.top_pct));
        el.set_style("pointer-events", "none");
        el.set_style(
            "animation",
            format!("pulse {}s ease-in-out infinite", self.pulse_s),
        );
    }
}

#[derive(Debug)]
struct LiveParticle {
    particle: Particle,
    removal: TimerHandle,
}

/// Periodic particle spawning. Particles remove themselves after their
/// lifetime; [`ParticleSpawner::stop`] ends spawning and clears the rest.
#[derive(Debug)]
pub struct ParticleSpawner {
    interval: TimerHandle,
    live: Rc<RefCell<Vec<LiveParticle>>>,
}

impl ParticleSpawner {
    pub fn start(
        scheduler: &mut Scheduler,
        settings: ParticleSettings,
        mut rng: fastrand::Rng,
    ) -> Self {
        let live: Rc<RefCell<Vec<LiveParticle>>> = Rc::default();
        let spawned = Rc::clone(&live);

        let interval = scheduler.set_interval(settings.interval_ms, move |doc, scheduler| {
            let element = doc.create_element("div");
            let particle = Particle {
                element,
                left_pct: rng.f64() * 100.0,
                top_pct: rng.f64() * 100.0,
                alpha: rng.f64() * settings.max_alpha,
                pulse_s: settings.pulse_min_s + rng.f64() * settings.pulse_spread_s,
                born_ms: scheduler.now(),
            };
            particle.apply_style(doc, settings.color);
            doc.append_to_body(element);

            let remaining = Rc::clone(&spawned);
            let removal = scheduler.set_timeout(settings.lifetime_ms, move |doc, _| {
                doc.remove(element);
                remaining
                    .borrow_mut()
                    .retain(|p| p.particle.element != element);
            });
            spawned.borrow_mut().push(LiveParticle { particle, removal });
        });

        Self { interval, live }
    }

    /// Particles currently on the page, oldest first.
    pub fn particles(&self) -> Vec<Particle> {
        self.live.borrow().iter().map(|p| p.particle).collect()
    }

    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }

    /// Stop spawning and remove every live particle.
    pub fn stop(self, scheduler: &mut Scheduler, doc: &mut Document) {
        scheduler.clear(self.interval);
        for live in self.live.borrow_mut().drain(..) {
            scheduler.clear(live.removal);
            doc.remove(live.particle.element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(alpha: f64, pulse_s: f64) -> Particle {
        Particle {
            element: Document::new().body(),
            left_pct: 0.0,
            top_pct: 0.0,
            alpha,
            pulse_s,
            born_ms: 1000,
        }
    }

    #[test]
    fn test_pulse_alpha_keyframes() {
        let p = particle(0.4, 2.0);
        assert_eq!(p.pulse_alpha(1000), 0.4);
        assert!((p.pulse_alpha(2000) - 0.2).abs() < 1e-12);
        assert!((p.pulse_alpha(3000) - 0.4).abs() < 1e-12);
        // Before birth counts as the first frame.
        assert_eq!(p.pulse_alpha(0), 0.4);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let p = particle(0.5, 3.7);
        for ms in (1000..20_000).step_by(37) {
            let a = p.pulse_alpha(ms);
            assert!((0.25..=0.5).contains(&a), "{a} at {ms}");
        }
    }

    #[test]
    fn test_spawn_and_expire() {
        let mut doc = Document::new();
        let mut scheduler = Scheduler::new();
        let spawner = ParticleSpawner::start(
            &mut scheduler,
            ParticleSettings::default(),
            fastrand::Rng::with_seed(7),
        );

        scheduler.advance_to(1999, &mut doc);
        assert!(spawner.is_empty());

        scheduler.advance_to(2000, &mut doc);
        let first = spawner.particles()[0];
        assert_eq!(first.born_ms, 2000);
        assert!((0.0..100.0).contains(&first.left_pct));
        assert!((0.0..0.5).contains(&first.alpha));
        assert!((2.0..5.0).contains(&first.pulse_s));

        let el = doc.element(first.element).unwrap();
        assert_eq!(el.style("position"), Some("fixed"));
        assert_eq!(el.style("width"), Some("3px"));
        assert_eq!(el.style("pointer-events"), Some("none"));
        assert!(el.style("background").unwrap().starts_with("rgba(167, 139, 250, "));
        assert!(el.style("animation").unwrap().ends_with("s ease-in-out infinite"));

        scheduler.advance_to(6000, &mut doc);
        assert_eq!(spawner.len(), 3);
        scheduler.advance_to(7000, &mut doc);
        assert_eq!(spawner.len(), 2);
        assert!(!doc.contains(first.element));
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut doc = Document::new();
        let mut scheduler = Scheduler::new();
        let spawner = ParticleSpawner::start(
            &mut scheduler,
            ParticleSettings::default(),
            fastrand::Rng::with_seed(1),
        );
        scheduler.advance_to(4000, &mut doc);
        assert_eq!(spawner.len(), 2);

        spawner.stop(&mut scheduler, &mut doc);
        assert_eq!(scheduler.pending(), 0);
        assert!(doc.element(doc.body()).unwrap().children().is_empty());
    }

    #[test]
    fn test_same_seed_same_particles() {
        let run = |seed| {
            let mut doc = Document::new();
            let mut scheduler = Scheduler::new();
            let spawner = ParticleSpawner::start(
                &mut scheduler,
                ParticleSettings::default(),
                fastrand::Rng::with_seed(seed),
            );
            scheduler.advance_to(4000, &mut doc);
            spawner
                .particles()
                .iter()
                .map(|p| (p.left_pct, p.top_pct, p.alpha, p.pulse_s))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
