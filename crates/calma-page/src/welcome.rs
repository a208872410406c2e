//! Welcome screen fade-out.

use std::cell::Cell;
use std::rc::Rc;

use calma_config::GeneralConfig;

use crate::dom::{Document, HIDDEN_CLASS};
use crate::timer::Scheduler;

pub const WELCOME_SCREEN_ID: &str = "welcome-screen";
pub const MAIN_CONTENT_ID: &str = "main-content";

/// Progress of the welcome transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WelcomeState {
    /// Welcome screen fully visible.
    #[default]
    Pending,
    /// Opacity set to zero at `since_ms`, still displayed.
    Fading { since_ms: u64 },
    /// Welcome screen gone, main content revealed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeTimings {
    /// Delay before the fade starts.
    pub visible_ms: u64,
    /// Delay between the fade and the reveal.
    pub fade_ms: u64,
}

impl Default for WelcomeTimings {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            fade_ms: 1000,
        }
    }
}

impl From<&GeneralConfig> for WelcomeTimings {
    fn from(config: &GeneralConfig) -> Self {
        Self {
            visible_ms: config.welcome_ms,
            fade_ms: config.fade_ms,
        }
    }
}

/// A running welcome transition. It cannot be cancelled.
#[derive(Debug, Clone)]
pub struct WelcomeSequence {
    state: Rc<Cell<WelcomeState>>,
    timings: WelcomeTimings,
}

impl WelcomeSequence {
    /// Schedule the fade and the reveal.
    pub fn start(scheduler: &mut Scheduler, timings: WelcomeTimings) -> Self {
        let state = Rc::new(Cell::new(WelcomeState::Pending));
        let shared = Rc::clone(&state);
        let fade_ms = timings.fade_ms;

        scheduler.set_timeout(timings.visible_ms, move |doc, scheduler| {
            match doc.get_element_by_id(WELCOME_SCREEN_ID) {
                Some(id) => {
                    if let Some(el) = doc.element_mut(id) {
                        el.set_style("opacity", "0");
                    }
                }
                None => log::warn!("no #{WELCOME_SCREEN_ID} element to fade"),
            }
            shared.set(WelcomeState::Fading {
                since_ms: scheduler.now(),
            });

            let shared = Rc::clone(&shared);
            scheduler.set_timeout(fade_ms, move |doc, _| {
                reveal(doc);
                shared.set(WelcomeState::Done);
                log::info!("welcome screen dismissed");
            });
        });

        Self { state, timings }
    }

    pub fn state(&self) -> WelcomeState {
        self.state.get()
    }

    pub fn timings(&self) -> WelcomeTimings {
        self.timings
    }

    /// Rendered opacity of the welcome screen at `now_ms`, following a
    /// linear opacity transition over the fade period.
    pub fn opacity(&self, now_ms: u64) -> f64 {
        match self.state() {
            WelcomeState::Pending => 1.0,
            WelcomeState::Fading { since_ms } => {
                if self.timings.fade_ms == 0 {
                    return 0.0;
                }
                let elapsed = now_ms.saturating_sub(since_ms) as f64;
                (1.0 - elapsed / self.timings.fade_ms as f64).clamp(0.0, 1.0)
            }
            WelcomeState::Done => 0.0,
        }
    }
}

fn reveal(doc: &mut Document) {
    match doc.get_element_by_id(WELCOME_SCREEN_ID) {
        Some(id) => {
            if let Some(el) = doc.element_mut(id) {
                el.set_style("display", "none");
            }
        }
        None => log::warn!("no #{WELCOME_SCREEN_ID} element to hide"),
    }
    match doc.get_element_by_id(MAIN_CONTENT_ID) {
        Some(id) => {
            if let Some(el) = doc.element_mut(id) {
                el.remove_class(HIDDEN_CLASS);
            }
        }
        None => log::warn!("no #{MAIN_CONTENT_ID} element to reveal"),
    }
}
