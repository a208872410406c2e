//! Guided exercise timelines.
//!
//! A breathing pattern is a sequence of phases repeated for a number of
//! cycles. The wave pattern is a single continuous transition from chaotic
//! to calm waves. Both are evaluated from elapsed time alone, so the caller
//! can seek, pause or restart freely.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::easing::ease_in_out_cubic;
use crate::error::{Error, Result};
use crate::interpolate::{Palette, lerp, lerp_color};

/// What the user is asked to do during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

/// One step of a breathing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingPhase {
    pub kind: PhaseKind,
    pub duration_ms: u64,
    pub palette: Palette,
    pub message: String,
}

/// A repeated breathing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub phases: Vec<BreathingPhase>,
    pub cycles: u32,
    /// Circle scale at the top of an inhale; the resting scale is 1.
    pub max_scale: f64,
    /// Question shown when the exercise ends.
    pub question: String,
    /// Message shown after the user answers.
    pub success: String,
}

/// State of a breathing exercise at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathingFrame<'a> {
    pub kind: PhaseKind,
    pub phase_index: usize,
    /// Zero-based cycle number.
    pub cycle: u32,
    /// Linear progress through the current phase.
    pub progress: f64,
    /// Eased progress through the current phase.
    pub eased: f64,
    pub scale: f64,
    pub color: Rgb,
    pub message: &'a str,
    pub finished: bool,
}

impl BreathingPattern {
    /// Check the pattern can be evaluated.
    pub fn validate(&self) -> Result<()> {
        if self.phases.is_empty() {
            return Err(Error::InvalidArgument("breathing pattern has no phases".into()));
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "max_scale must be positive, got {}",
                self.max_scale
            )));
        }
        Ok(())
    }

    /// Length of one cycle, saturating at `u64::MAX`.
    pub fn cycle_ms(&self) -> u64 {
        self.phases
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.duration_ms))
    }

    /// Length of the whole exercise, saturating at `u64::MAX`.
    pub fn total_ms(&self) -> u64 {
        self.cycle_ms().saturating_mul(u64::from(self.cycles))
    }

    /// Evaluate the exercise `elapsed_ms` after it started. A pattern without
    /// phases is finished from the start.
    pub fn frame(&self, elapsed_ms: u64) -> BreathingFrame<'_> {
        let cycle_ms = self.cycle_ms();
        if cycle_ms == 0 || elapsed_ms >= self.total_ms() {
            return self.finished_frame();
        }

        let cycle = (elapsed_ms / cycle_ms) as u32;
        let mut within = elapsed_ms % cycle_ms;
        let mut index = 0;
        for (i, phase) in self.phases.iter().enumerate() {
            if within < phase.duration_ms {
                index = i;
                break;
            }
            within -= phase.duration_ms;
        }

        let phase = &self.phases[index];
        let progress = within as f64 / phase.duration_ms as f64;
        let eased = ease_in_out_cubic(progress);

        BreathingFrame {
            kind: phase.kind,
            phase_index: index,
            cycle,
            progress,
            eased,
            scale: self.scale_for(index, eased),
            color: phase.palette.sample(progress),
            message: &phase.message,
            finished: false,
        }
    }

    fn finished_frame(&self) -> BreathingFrame<'_> {
        let index = self.phases.len().saturating_sub(1);
        let (kind, scale, color) = match self.phases.last() {
            Some(phase) => (phase.kind, self.scale_for(index, 1.0), phase.palette.last()),
            None => (PhaseKind::Pause, 1.0, Rgb::BLACK),
        };
        BreathingFrame {
            kind,
            phase_index: index,
            cycle: self.cycles.saturating_sub(1),
            progress: 1.0,
            eased: 1.0,
            scale,
            color,
            message: &self.question,
            finished: true,
        }
    }

    fn scale_for(&self, index: usize, eased: f64) -> f64 {
        match self.phases[index].kind {
            PhaseKind::Inhale => lerp(1.0, self.max_scale, eased),
            PhaseKind::Exhale => lerp(self.max_scale, 1.0, eased),
            PhaseKind::Hold | PhaseKind::Pause => self.resting_scale_before(index),
        }
    }

    /// Scale left behind by the closest preceding inhale or exhale, wrapping
    /// around to the end of the previous cycle.
    fn resting_scale_before(&self, index: usize) -> f64 {
        let n = self.phases.len();
        (1..=n)
            .map(|back| &self.phases[(index + n - back) % n])
            .find_map(|p| match p.kind {
                PhaseKind::Inhale => Some(self.max_scale),
                PhaseKind::Exhale => Some(1.0),
                _ => None,
            })
            .unwrap_or(1.0)
    }
}

/// A value that moves from `start` to `end` over an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub start: f64,
    pub end: f64,
}

impl ValueRange {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn at(self, t: f64) -> f64 {
        lerp(self.start, self.end, t)
    }
}

/// Calming waves: chaotic, fast, tall waves settle into slow gentle ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavePattern {
    pub duration_ms: u64,
    pub wave_count: u32,
    pub chaos: ValueRange,
    pub speed: ValueRange,
    /// Wave amplitude in pixels.
    pub amplitude: ValueRange,
    pub chaos_palette: Palette,
    pub calm_palette: Palette,
    pub start_message: String,
    pub middle_message: String,
    pub end_message: String,
    pub question: String,
    pub success: String,
}

/// State of the wave exercise at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFrame<'a> {
    pub progress: f64,
    pub chaos: f64,
    pub speed: f64,
    pub amplitude: f64,
    pub color: Rgb,
    pub message: &'a str,
    pub finished: bool,
}

impl WavePattern {
    /// Evaluate the exercise `elapsed_ms` after it started.
    pub fn frame(&self, elapsed_ms: u64) -> WaveFrame<'_> {
        let finished = elapsed_ms >= self.duration_ms;
        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
        };
        let eased = ease_in_out_cubic(progress);

        let message = if finished {
            &self.question
        } else if progress < 1.0 / 3.0 {
            &self.start_message
        } else if progress < 2.0 / 3.0 {
            &self.middle_message
        } else {
            &self.end_message
        };

        WaveFrame {
            progress,
            chaos: self.chaos.at(eased),
            speed: self.speed.at(eased),
            amplitude: self.amplitude.at(eased),
            color: lerp_color(
                self.chaos_palette.sample(progress),
                self.calm_palette.sample(progress),
                eased,
            ),
            message,
            finished,
        }
    }
}
