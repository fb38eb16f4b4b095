//! Configuration for the humanizer and the player.

use crate::error::ConfigError;
use std::time::Duration;

/// Delay pass settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayConfig {
    /// Base pause between keystrokes, scaled by the contextual multipliers.
    pub base_delay_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self { base_delay_ms: 40 }
    }
}

/// Typo pass settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TypoConfig {
    /// Chance per scanned op of starting a correction burst.
    pub probability: f64,
    /// Shortest burst run.
    pub min_run: usize,
    /// Exclusive upper bound for the burst run.
    pub max_run: usize,
    /// Extra pause before the mistake gets noticed.
    pub hesitation_ms: u64,
}

impl TypoConfig {
    /// No typos; playback becomes fully deterministic.
    pub fn disabled() -> Self {
        Self {
            probability: 0.0,
            ..Self::default()
        }
    }
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            probability: 1.0 / 40.0,
            min_run: 2,
            max_run: 4,
            hesitation_ms: 350,
        }
    }
}

/// Both humanizer passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumanizeConfig {
    /// Contextual delay settings.
    pub delay: DelayConfig,
    /// Typo injection settings.
    pub typo: TypoConfig,
}

/// Configuration for the [`Player`](crate::player::Player).
#[derive(Debug, Clone, PartialEq)]
pub struct TypistConfig {
    /// Global speed multiplier applied to every scheduled op delay.
    pub speed_multiplier: f64,
    /// Leave the cursor visible and blinking after completion.
    pub stay: bool,
    /// Pause before the first op of a run.
    pub lead_in: Duration,
    /// Grace period between the last op and the settled cursor.
    pub settle_delay: Duration,
    /// Humanizer settings.
    pub humanize: HumanizeConfig,
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            stay: false,
            lead_in: Duration::from_millis(150),
            settle_delay: Duration::from_millis(450),
            humanize: HumanizeConfig::default(),
        }
    }
}

impl TypistConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(ConfigError::SpeedMultiplier(self.speed_multiplier));
        }

        let typo = &self.humanize.typo;
        if !(0.0..=1.0).contains(&typo.probability) {
            return Err(ConfigError::TypoProbability(typo.probability));
        }
        if typo.min_run == 0 || typo.max_run <= typo.min_run {
            return Err(ConfigError::TypoRun {
                min: typo.min_run,
                max: typo.max_run,
            });
        }

        Ok(())
    }

    /// Scale a script delay by the speed multiplier.
    pub fn scaled(&self, delay_ms: u64) -> Duration {
        self.scale(Duration::from_millis(delay_ms))
    }

    /// Scale any duration by the speed multiplier, to the nanosecond.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn scale(&self, duration: Duration) -> Duration {
        Duration::from_nanos((duration.as_nanos() as f64 * self.speed_multiplier).round() as u64)
    }
}
