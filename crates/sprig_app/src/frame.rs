//! Fixed-step frame loop.
//!
//! Stands in for the windowing layer: it owns frame cadence and the registry
//! and scheduler, and calls [`Scheduler::update`] once per frame.

use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use sprig_registry::EntityRegistry;
use sprig_system::{ScheduleError, Scheduler};

/// Environment variable overriding [`FrameConfig::frame_rate`].
pub const FRAME_RATE_ENV: &str = "SPRIG_FRAME_RATE";

/// Environment variable overriding [`FrameConfig::max_frames`].
pub const MAX_FRAMES_ENV: &str = "SPRIG_MAX_FRAMES";

/// Errors raised while reading [`FrameConfig`] overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value `{value}` for {var}: {reason}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The frame rate must be a positive, finite number.
    #[error("frame rate must be positive, got {0}")]
    NonPositiveFrameRate(f64),

    /// The frame rate is so low that one frame does not fit in a [`Duration`].
    #[error("frame rate {0} is too low to express as a frame duration")]
    FrameRateTooLow(f64),
}

/// Configuration for the frame loop.
///
/// The frame rate is only set through [`FrameConfig::with_frame_rate`], so
/// [`FrameConfig::frame_duration`] always fits in a [`Duration`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    /// Target frames per second.
    frame_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    max_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 0,
        }
    }
}

impl FrameConfig {
    /// Defaults overridden by `SPRIG_FRAME_RATE` and `SPRIG_MAX_FRAMES`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(rate) = parse_var(&lookup, FRAME_RATE_ENV)? {
            config = config.with_frame_rate(rate)?;
        }
        if let Some(max) = parse_var(&lookup, MAX_FRAMES_ENV)? {
            config.max_frames = max;
        }
        Ok(config)
    }

    /// Override the frame rate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveFrameRate`] unless `rate` is positive
    /// and finite, and [`ConfigError::FrameRateTooLow`] if `1 / rate` seconds
    /// overflows a [`Duration`].
    pub fn with_frame_rate(mut self, rate: f64) -> Result<Self, ConfigError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::NonPositiveFrameRate(rate));
        }
        if Duration::try_from_secs_f64(1.0 / rate).is_err() {
            return Err(ConfigError::FrameRateTooLow(rate));
        }
        self.frame_rate = rate;
        Ok(self)
    }

    /// Limit the loop to `max_frames` frames.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Target frames per second.
    #[must_use]
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Maximum number of frames to run (0 = unlimited).
    #[must_use]
    pub fn max_frames(&self) -> u64 {
        self.max_frames
    }

    /// Duration of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        })
}

/// Drives the scheduler at a fixed step.
#[derive(Debug)]
pub struct FrameLoop {
    config: FrameConfig,
    /// Fields drop in declaration order, so systems go before the registry.
    scheduler: Scheduler,
    registry: EntityRegistry,
}

impl FrameLoop {
    /// Create a frame loop over an already-populated registry.
    #[must_use]
    pub fn new(config: FrameConfig, registry: EntityRegistry, scheduler: Scheduler) -> Self {
        Self {
            config,
            scheduler,
            registry,
        }
    }

    /// Returns a reference to the registry.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Returns the number of frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.scheduler.frame()
    }

    /// Run exactly one frame with the given step.
    ///
    /// # Errors
    ///
    /// Propagates the first system failure.
    pub fn frame(&mut self, dt: f32) -> Result<(), ScheduleError> {
        self.scheduler.update(&mut self.registry, dt)
    }

    /// Run frames until `max_frames` is reached (forever if it is 0),
    /// sleeping to hold the configured rate. Returns the frames run.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first system failure.
    pub fn run(&mut self) -> Result<u64, ScheduleError> {
        let frame_duration = self.config.frame_duration();
        let dt = frame_duration.as_secs_f32();
        let mut frames = 0u64;

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            systems = self.scheduler.len(),
            entities = self.registry.len(),
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            if let Err(err) = self.frame(dt) {
                error!(frame = self.scheduler.frame(), %err, "frame failed");
                return Err(err);
            }

            frames += 1;
            if self.config.max_frames > 0 && frames >= self.config.max_frames {
                info!(frames, entities = self.registry.len(), "frame loop complete");
                return Ok(frames);
            }

            let elapsed = start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            } else {
                warn!(
                    frame = self.scheduler.frame(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
            debug!(frame = self.scheduler.frame(), entities = self.registry.len(), "frame end");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::anyhow;
    use sprig_component::Query;
    use sprig_system::FnSystem;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = FrameConfig::default();
        assert_eq!(config.frame_rate(), 60.0);
        assert_eq!(config.max_frames(), 0);
    }

    #[test]
    fn test_config_from_lookup_overrides() {
        let config =
            FrameConfig::from_lookup(lookup_from(&[(FRAME_RATE_ENV, "30"), (MAX_FRAMES_ENV, " 5 ")]))
                .unwrap();
        assert_eq!(config.frame_rate(), 30.0);
        assert_eq!(config.max_frames(), 5);
    }

    #[test]
    fn test_config_from_empty_lookup_is_default() {
        let config = FrameConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, FrameConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = FrameConfig::from_lookup(lookup_from(&[(MAX_FRAMES_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: MAX_FRAMES_ENV, .. }));

        let err = FrameConfig::from_lookup(lookup_from(&[(FRAME_RATE_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveFrameRate(_)));
    }

    #[test]
    fn test_config_rejects_rate_with_unrepresentable_duration() {
        let err = FrameConfig::from_lookup(lookup_from(&[(FRAME_RATE_ENV, "1e-30")])).unwrap_err();
        assert!(matches!(err, ConfigError::FrameRateTooLow(rate) if rate == 1e-30));

        let slow = FrameConfig::default().with_frame_rate(0.5).unwrap();
        assert_eq!(slow.frame_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_run_limited_frames() {
        let config = FrameConfig::default()
            .with_frame_rate(1000.0)
            .unwrap()
            .with_max_frames(5);
        let mut frame_loop = FrameLoop::new(config, EntityRegistry::new(), Scheduler::new());
        assert_eq!(frame_loop.run().unwrap(), 5);
        assert_eq!(frame_loop.frame_count(), 5);
    }

    #[test]
    fn test_run_stops_on_system_failure() {
        let mut registry = EntityRegistry::new();
        let _ = registry.create_entity("victim");
        let mut scheduler = Scheduler::new();
        scheduler.add_system(FnSystem::new("fails", Query::all(), |ctx, _| {
            if ctx.frame() == 2 {
                return Err(anyhow!("broken on frame two"));
            }
            Ok(())
        }));

        let config = FrameConfig::default()
            .with_frame_rate(1000.0)
            .unwrap()
            .with_max_frames(10);
        let mut frame_loop = FrameLoop::new(config, registry, scheduler);
        let err = frame_loop.run().unwrap_err();
        assert!(err.to_string().contains("frame 2"));
        assert_eq!(frame_loop.frame_count(), 2);
    }
}
