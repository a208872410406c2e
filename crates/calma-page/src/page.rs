//! The landing page: welcome screen, exercise menu and ambient effects.

use std::fmt;

use calma_config::Config;
use calma_core::{CircleStyle, Result, Rgb};

use crate::circle::update_circle_style;
use crate::dom::{Document, ElementId, HIDDEN_CLASS};
use crate::particles::{Particle, ParticleSettings, ParticleSpawner};
use crate::scroll::{AnchorScroller, ClickOutcome};
use crate::timer::Scheduler;
use crate::welcome::{
    MAIN_CONTENT_ID, WELCOME_SCREEN_ID, WelcomeSequence, WelcomeState, WelcomeTimings,
};

pub const BREATHING_CIRCLE_ID: &str = "breathing-circle";

/// Vertical distance between two exercise sections, in rows.
pub const SECTION_SPACING: f64 = 10.0;

const WELCOME_TEXT: &str = "Welcome. Take a moment for yourself.";

/// The guided exercises offered on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    Anxiety,
    Anger,
    Stress,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::Anxiety, Exercise::Anger, Exercise::Stress];

    /// Element id of the exercise section.
    pub fn id(self) -> &'static str {
        match self {
            Exercise::Anxiety => "anxiety",
            Exercise::Anger => "anger",
            Exercise::Stress => "stress",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Exercise::Anxiety => "Anxiety",
            Exercise::Anger => "Anger",
            Exercise::Stress => "Stress",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Exercise::Anxiety => "4-4 breathing to slow a racing mind",
            Exercise::Anger => "4-7-8 breathing to cool down",
            Exercise::Stress => "Watch chaotic waves settle into calm",
        }
    }

    /// Theme color of the exercise.
    pub fn color(self, config: &Config) -> Rgb {
        match self {
            Exercise::Anxiety => config.theme.anxiety,
            Exercise::Anger => config.theme.anger,
            Exercise::Stress => config.theme.stress,
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// An exercise section and the menu link pointing at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub exercise: Exercise,
    pub element: ElementId,
    pub link: ElementId,
}

/// The page document together with its timers and effects.
#[derive(Debug)]
pub struct Page {
    doc: Document,
    scheduler: Scheduler,
    welcome_timings: WelcomeTimings,
    particle_settings: Option<ParticleSettings>,
    rng: Option<fastrand::Rng>,
    welcome: Option<WelcomeSequence>,
    particles: Option<ParticleSpawner>,
    scroller: AnchorScroller,
    sections: Vec<Section>,
    circle: ElementId,
}

impl Page {
    /// Build the page document. Nothing is scheduled until [`Page::start`].
    ///
    /// `seed` drives particle placement.
    pub fn new(config: &Config, seed: u64) -> Self {
        let mut doc = Document::new();

        let welcome = doc.create_element("div");
        doc.set_id(welcome, WELCOME_SCREEN_ID);
        if let Some(el) = doc.element_mut(welcome) {
            el.set_text(WELCOME_TEXT);
        }
        doc.append_to_body(welcome);

        let main = doc.create_element("main");
        doc.set_id(main, MAIN_CONTENT_ID);
        if let Some(el) = doc.element_mut(main) {
            el.add_class(HIDDEN_CLASS);
        }
        doc.append_to_body(main);

        let nav = doc.create_element("nav");
        doc.append_child(main, nav);

        let mut sections = Vec::with_capacity(Exercise::ALL.len());
        for (i, exercise) in Exercise::ALL.into_iter().enumerate() {
            let link = doc.create_element("a");
            if let Some(el) = doc.element_mut(link) {
                el.set_href(format!("#{}", exercise.id()));
                el.set_text(exercise.title());
            }
            doc.append_child(nav, link);

            let element = doc.create_element("section");
            doc.set_id(element, exercise.id());
            if let Some(el) = doc.element_mut(element) {
                el.set_text(exercise.description());
                el.set_offset_top(i as f64 * SECTION_SPACING);
            }
            doc.append_child(main, element);

            sections.push(Section {
                exercise,
                element,
                link,
            });
        }

        let circle = doc.create_element("div");
        doc.set_id(circle, BREATHING_CIRCLE_ID);
        doc.append_child(main, circle);

        let last = sections.len().saturating_sub(1) as f64;
        doc.scroll_view_mut().set_limit(Some(last * SECTION_SPACING));

        let scroller = AnchorScroller::attach(&doc, config.general.scroll_ms)
            .with_easing(config.general.scroll_easing);

        Self {
            doc,
            scheduler: Scheduler::new(),
            welcome_timings: WelcomeTimings::from(&config.general),
            particle_settings: config
                .particles
                .enabled
                .then(|| ParticleSettings::from(&config.particles)),
            rng: Some(fastrand::Rng::with_seed(seed)),
            welcome: None,
            particles: None,
            scroller,
            sections,
            circle,
        }
    }

    /// Arm the welcome transition and the particle spawner at `now_ms`.
    /// Calling it again has no effect.
    pub fn start(&mut self, now_ms: u64) {
        if self.welcome.is_some() {
            return;
        }
        self.scheduler.advance_to(now_ms, &mut self.doc);
        self.welcome = Some(WelcomeSequence::start(
            &mut self.scheduler,
            self.welcome_timings,
        ));
        if let (Some(settings), Some(rng)) = (self.particle_settings, self.rng.take()) {
            self.particles = Some(ParticleSpawner::start(&mut self.scheduler, settings, rng));
        }
        log::info!("page started at {now_ms} ms");
    }

    /// Run due timers and advance the scroll animation.
    pub fn tick(&mut self, now_ms: u64) {
        self.scheduler.advance_to(now_ms, &mut self.doc);
        self.doc.scroll_view_mut().tick(now_ms);
    }

    /// Dispatch a click on `target`.
    pub fn click(&mut self, target: ElementId, now_ms: u64) -> ClickOutcome {
        self.scroller.handle_click(&mut self.doc, target, now_ms)
    }

    /// Click the menu link of `exercise`.
    pub fn go_to(&mut self, exercise: Exercise, now_ms: u64) -> ClickOutcome {
        match self.section(exercise) {
            Some(section) => self.click(section.link, now_ms),
            None => ClickOutcome::default(),
        }
    }

    /// Restyle the breathing circle.
    pub fn update_circle(
        &mut self,
        color: Rgb,
        scale: f64,
        max_scale: f64,
    ) -> Result<CircleStyle> {
        let circle = self.doc.element_mut(self.circle).ok_or_else(|| {
            calma_core::Error::InvalidArgument("breathing circle was removed".into())
        })?;
        update_circle_style(circle, color, scale, max_scale)
    }

    /// Stop spawning particles and remove the live ones.
    pub fn stop_particles(&mut self) {
        if let Some(spawner) = self.particles.take() {
            spawner.stop(&mut self.scheduler, &mut self.doc);
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn welcome_state(&self) -> WelcomeState {
        self.welcome
            .as_ref()
            .map_or(WelcomeState::Pending, WelcomeSequence::state)
    }

    /// Rendered opacity of the welcome screen.
    pub fn welcome_opacity(&self, now_ms: u64) -> f64 {
        self.welcome.as_ref().map_or(1.0, |w| w.opacity(now_ms))
    }

    /// Whether the exercise menu is revealed.
    pub fn main_visible(&self) -> bool {
        self.doc
            .get_element_by_id(MAIN_CONTENT_ID)
            .and_then(|id| self.doc.element(id))
            .is_some_and(|el| !el.is_hidden())
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.particles
            .as_ref()
            .map(ParticleSpawner::particles)
            .unwrap_or_default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, exercise: Exercise) -> Option<Section> {
        self.sections
            .iter()
            .find(|s| s.exercise == exercise)
            .copied()
    }

    pub fn scroll_position(&self) -> f64 {
        self.doc.scroll_view().position()
    }

    pub fn circle_element(&self) -> ElementId {
        self.circle
    }
}
