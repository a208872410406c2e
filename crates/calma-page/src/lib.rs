//! Page behavior for the calma relaxation app.
//!
//! A small document model stands in for the host page. Timers are driven by
//! the caller through [`Scheduler::advance_to`], so every effect here is
//! deterministic for a given sequence of timestamps:
//!
//! - the welcome screen fades out and reveals the main content,
//! - ambient particles spawn and expire on their own timers,
//! - in-page anchor links scroll smoothly to their targets,
//! - the breathing circle is restyled from its current scale.

mod circle;
mod dom;
mod page;
mod particles;
mod scroll;
mod timer;
mod welcome;

pub use circle::update_circle_style;
pub use dom::{Document, Element, ElementId, HIDDEN_CLASS};
pub use page::{BREATHING_CIRCLE_ID, Exercise, Page, SECTION_SPACING, Section};
pub use particles::{Particle, ParticleSettings, ParticleSpawner};
pub use scroll::{AnchorScroller, ClickOutcome, ScrollView};
pub use timer::{Scheduler, Task, TimerHandle};
pub use welcome::{
    MAIN_CONTENT_ID, WELCOME_SCREEN_ID, WelcomeSequence, WelcomeState, WelcomeTimings,
};
