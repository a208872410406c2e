//! Configuration for the calma relaxation app.
//!
//! The config file is optional. Every section falls back to the built-in
//! defaults, which hold the timings, palettes and messages of the three
//! guided exercises.

mod defaults;

use std::fs;
use std::path::{Path, PathBuf};

use calma_core::{BreathingPattern, Easing, Rgb, WavePattern};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Errors raised while loading the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Shared UI timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// How long the welcome screen stays fully visible.
    pub welcome_ms: u64,
    /// Duration of fade transitions.
    pub fade_ms: u64,
    /// How long closing messages stay on screen.
    pub message_display_ms: u64,
    /// Duration of smooth anchor scrolling.
    pub scroll_ms: u64,
    /// Curve of smooth anchor scrolling.
    pub scroll_easing: Easing,
    /// Target frames per second of the render loop.
    pub fps: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            welcome_ms: 3000,
            fade_ms: 1000,
            message_display_ms: 2000,
            scroll_ms: 400,
            scroll_easing: Easing::InOutCubic,
            fps: 30,
        }
    }
}

/// Animated radial-gradient backdrop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Orb color when no exercise is running.
    pub color: Rgb,
    /// Channel multipliers of the dim backdrop fill.
    pub r_mult: f64,
    pub g_mult: f64,
    pub b_mult: f64,
    /// Animation speed applied to epoch milliseconds.
    pub speed: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: defaults::ACCENT,
            r_mult: 0.1,
            g_mult: 0.1,
            b_mult: 0.15,
            speed: 0.0005,
        }
    }
}

/// Ambient particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub enabled: bool,
    /// Time between two spawns.
    pub interval_ms: u64,
    /// Time a particle stays on screen.
    pub lifetime_ms: u64,
    pub color: Rgb,
    /// Upper bound of the random particle opacity.
    pub max_alpha: f64,
    /// Shortest pulse period in seconds.
    pub pulse_min_s: f64,
    /// Random extra pulse period in seconds.
    pub pulse_spread_s: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 2000,
            lifetime_ms: 5000,
            color: defaults::ACCENT,
            max_alpha: 0.5,
            pulse_min_s: 2.0,
            pulse_spread_s: 3.0,
        }
    }
}

/// Colors of the main screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub text: Rgb,
    pub dim_text: Rgb,
    pub accent: Rgb,
    pub anxiety: Rgb,
    pub anger: Rgb,
    pub stress: Rgb,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            text: Rgb::new(226, 232, 240),
            dim_text: Rgb::new(100, 116, 139),
            accent: defaults::ACCENT,
            anxiety: Rgb::new(34, 211, 238),
            anger: Rgb::new(248, 113, 113),
            stress: Rgb::new(251, 146, 60),
        }
    }
}

/// Complete application configuration.
///
/// An exercise table present in the file replaces the built-in exercise
/// entirely; the other sections merge field by field with the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub background: BackgroundConfig,
    pub particles: ParticleConfig,
    pub theme: ThemeConfig,
    /// 4-4 breathing.
    pub anxiety: BreathingPattern,
    /// 4-7-8 breathing.
    pub anger: BreathingPattern,
    /// Calming waves.
    pub stress: WavePattern,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            background: BackgroundConfig::default(),
            particles: ParticleConfig::default(),
            theme: ThemeConfig::default(),
            anxiety: defaults::anxiety(),
            anger: defaults::anger(),
            stress: defaults::stress(),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default location when
    /// `path` is `None`. A missing file at the default location yields the
    /// defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => {
                    log::info!("no config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !path.exists() {
            log::info!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Location of `config.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|d| d.config_dir().join("config.toml"))
    }

    /// Location of the log file in the platform data directory.
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|d| d.data_dir().join("calma.log"))
    }

    /// Reject values the animations cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, pattern) in [("anxiety", &self.anxiety), ("anger", &self.anger)] {
            pattern
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("[{name}] {e}")))?;
        }
        if self.stress.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "[stress] duration_ms must be positive".into(),
            ));
        }
        if self.particles.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "[particles] interval_ms must be positive".into(),
            ));
        }
        let bg = &self.background;
        for (name, value) in [
            ("speed", bg.speed),
            ("r_mult", bg.r_mult),
            ("g_mult", bg.g_mult),
            ("b_mult", bg.b_mult),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "[background] {name} must be a finite number"
                )));
            }
        }
        let particles = &self.particles;
        for (name, value) in [
            ("max_alpha", particles.max_alpha),
            ("pulse_min_s", particles.pulse_min_s),
            ("pulse_spread_s", particles.pulse_spread_s),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "[particles] {name} must be a finite number"
                )));
            }
        }
        if self.general.fps == 0 {
            return Err(ConfigError::Invalid("[general] fps must be positive".into()));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "calma")
}

#[cfg(test)]
mod tests {
    use super::*;
    use calma_core::PhaseKind;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.welcome_ms, 3000);
        assert_eq!(config.general.fade_ms, 1000);
        assert_eq!(config.particles.interval_ms, 2000);
        assert_eq!(config.particles.lifetime_ms, 5000);
    }

    #[test]
    fn test_default_exercise_lengths() {
        let config = Config::default();
        assert_eq!(config.anxiety.total_ms(), 45_000);
        assert_eq!(config.anger.total_ms(), 38_000);
        assert_eq!(config.stress.duration_ms, 30_000);
        assert_eq!(config.anger.phases[1].kind, PhaseKind::Hold);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section_merges_with_defaults() {
        let config = Config::from_toml_str(
            r#"
            [general]
            welcome_ms = 1500
            scroll_easing = "linear"

            [background]
            color = { r = 14, g = 165, b = 233 }
            "#,
        )
        .unwrap();
        assert_eq!(config.general.welcome_ms, 1500);
        assert_eq!(config.general.fade_ms, 1000);
        assert_eq!(config.general.scroll_easing, Easing::Linear);
        assert_eq!(config.background.color, Rgb::new(14, 165, 233));
        assert_eq!(config.background.speed, 0.0005);
    }

    #[test]
    fn test_exercise_table_replaces_default() {
        let config = Config::from_toml_str(
            r#"
            [anxiety]
            cycles = 1
            max_scale = 1.5
            question = "Better?"
            success = "Good."

            [[anxiety.phases]]
            kind = "inhale"
            duration_ms = 3000
            palette = [{ r = 0, g = 0, b = 255 }]
            message = "In"

            [[anxiety.phases]]
            kind = "exhale"
            duration_ms = 3000
            palette = [{ r = 0, g = 255, b = 0 }]
            message = "Out"
            "#,
        )
        .unwrap();
        assert_eq!(config.anxiety.total_ms(), 6000);
        assert_eq!(config.anger, defaults::anger());
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = Config::from_toml_str(
            r#"
            [anxiety]
            cycles = 1
            max_scale = 1.5
            question = ""
            success = ""

            [[anxiety.phases]]
            kind = "inhale"
            duration_ms = 3000
            palette = []
            message = "In"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = Config::from_toml_str("[particles]\ninterval_ms = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::from_toml_str("[general]\nfps = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for toml in [
            "[background]\nspeed = nan\n",
            "[background]\nspeed = inf\n",
            "[background]\ng_mult = -inf\n",
            "[particles]\nmax_alpha = nan\n",
        ] {
            let result = Config::from_toml_str(toml);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "{toml}");
        }
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/calma/config.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
