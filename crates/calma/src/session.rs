//! A running exercise, from the first breath to the closing message.

use calma_config::Config;
use calma_core::{BreathingFrame, Rgb, WaveFrame};
use calma_page::Exercise;

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Running,
    /// The exercise is over and asks how the user feels.
    Question,
    /// The user answered yes; the success message shows until it expires.
    Success { since_ms: u64 },
}

/// What to draw for the current instant.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual<'a> {
    Breathing {
        frame: BreathingFrame<'a>,
        max_scale: f64,
    },
    Waves {
        frame: WaveFrame<'a>,
        wave_count: u32,
        time_s: f64,
    },
}

impl<'a> Visual<'a> {
    pub fn color(&self) -> Rgb {
        match self {
            Visual::Breathing { frame, .. } => frame.color,
            Visual::Waves { frame, .. } => frame.color,
        }
    }

    pub fn message(&self) -> &'a str {
        match self {
            Visual::Breathing { frame, .. } => frame.message,
            Visual::Waves { frame, .. } => frame.message,
        }
    }

    pub fn finished(&self) -> bool {
        match self {
            Visual::Breathing { frame, .. } => frame.finished,
            Visual::Waves { frame, .. } => frame.finished,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    exercise: Exercise,
    started_ms: u64,
    stage: Stage,
}

impl Session {
    pub fn new(exercise: Exercise, now_ms: u64) -> Self {
        log::info!("starting {exercise} exercise");
        Self {
            exercise,
            started_ms: now_ms,
            stage: Stage::Running,
        }
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    /// Evaluate the exercise timeline.
    pub fn visual<'a>(&self, config: &'a Config, now_ms: u64) -> Visual<'a> {
        let elapsed = self.elapsed(now_ms);
        match self.exercise {
            Exercise::Anxiety | Exercise::Anger => {
                let pattern = if self.exercise == Exercise::Anxiety {
                    &config.anxiety
                } else {
                    &config.anger
                };
                Visual::Breathing {
                    frame: pattern.frame(elapsed),
                    max_scale: pattern.max_scale,
                }
            }
            Exercise::Stress => Visual::Waves {
                frame: config.stress.frame(elapsed),
                wave_count: config.stress.wave_count,
                time_s: elapsed as f64 / 1000.0,
            },
        }
    }

    /// Advance the stage. Returns `false` once the session is over.
    pub fn update(&mut self, config: &Config, now_ms: u64) -> bool {
        match self.stage {
            Stage::Running => {
                if self.visual(config, now_ms).finished() {
                    self.stage = Stage::Question;
                }
                true
            }
            Stage::Question => true,
            Stage::Success { since_ms } => {
                now_ms.saturating_sub(since_ms) < config.general.message_display_ms
            }
        }
    }

    /// Answer the closing question. "No" runs the exercise again.
    pub fn answer(&mut self, feels_better: bool, now_ms: u64) {
        if self.stage != Stage::Question {
            return;
        }
        if feels_better {
            self.stage = Stage::Success { since_ms: now_ms };
        } else {
            log::info!("repeating {} exercise", self.exercise);
            self.started_ms = now_ms;
            self.stage = Stage::Running;
        }
    }

    /// Text shown under the exercise visual.
    pub fn message<'a>(&self, config: &'a Config, now_ms: u64) -> &'a str {
        let (question, success) = match self.exercise {
            Exercise::Anxiety => (&config.anxiety.question, &config.anxiety.success),
            Exercise::Anger => (&config.anger.question, &config.anger.success),
            Exercise::Stress => (&config.stress.question, &config.stress.success),
        };
        match self.stage {
            Stage::Running => self.visual(config, now_ms).message(),
            Stage::Question => question.as_str(),
            Stage::Success { .. } => success.as_str(),
        }
    }
}
