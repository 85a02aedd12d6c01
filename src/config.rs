//! Controller configuration.

use crate::time::TimeDuration;
use crate::transition::DEFAULT_FADE_STEP;
use core::num::NonZeroU8;
use palette::Srgb;

/// Inactivity period after which a partial frame is dropped.
pub const DEFAULT_FRAME_TIMEOUT_MS: u64 = 1000;

/// Suggested pause between control loop iterations.
pub const DEFAULT_LOOP_INTERVAL_MS: u64 = 10;

/// Output brightness applied by the strip, `255` meaning unscaled.
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Number of pixels on the default strip.
pub const DEFAULT_STRIP_LEN: usize = 60;

/// Color shown at startup.
pub const COLOR_OFF: Srgb<u8> = Srgb::new(0, 0, 0);

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Fade step of zero would never reach the target.
    ZeroFadeStep,
    /// Loop interval of zero would spin without yielding.
    ZeroLoopInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFadeStep => write!(f, "fade step must be non-zero"),
            ConfigError::ZeroLoopInterval => write!(f, "loop interval must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Settings fixed at startup.
///
/// Output brightness lives here. The controller hands it to the sink once,
/// at construction, through [`ColorSink::set_brightness`]. The brightness
/// field of incoming commands is never applied.
///
/// [`ColorSink::set_brightness`]: crate::strip::ColorSink::set_brightness
#[derive(Debug, Clone, Copy)]
pub struct Config<D: TimeDuration> {
    frame_timeout: D,
    loop_interval: D,
    fade_step: NonZeroU8,
    brightness: u8,
    initial_color: Srgb<u8>,
}

impl<D: TimeDuration> Config<D> {
    /// Creates a configuration builder with default values.
    pub fn builder() -> ConfigBuilder<D> {
        ConfigBuilder::new()
    }

    /// Returns the partial frame inactivity timeout.
    pub fn frame_timeout(&self) -> D {
        self.frame_timeout
    }

    /// Returns the pause the caller should take between iterations.
    pub fn loop_interval(&self) -> D {
        self.loop_interval
    }

    /// Returns the per-channel fade step.
    pub fn fade_step(&self) -> NonZeroU8 {
        self.fade_step
    }

    /// Returns the fixed output brightness.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the startup color.
    pub fn initial_color(&self) -> Srgb<u8> {
        self.initial_color
    }
}

impl<D: TimeDuration> Default for Config<D> {
    fn default() -> Self {
        Self {
            frame_timeout: D::from_millis(DEFAULT_FRAME_TIMEOUT_MS),
            loop_interval: D::from_millis(DEFAULT_LOOP_INTERVAL_MS),
            fade_step: DEFAULT_FADE_STEP,
            brightness: DEFAULT_BRIGHTNESS,
            initial_color: COLOR_OFF,
        }
    }
}

/// Builder for validated [`Config`] values.
#[derive(Debug)]
pub struct ConfigBuilder<D: TimeDuration> {
    frame_timeout: D,
    loop_interval: D,
    fade_step: u8,
    brightness: u8,
    initial_color: Srgb<u8>,
}

impl<D: TimeDuration> ConfigBuilder<D> {
    /// Creates a builder holding the values of [`Config::default`].
    pub fn new() -> Self {
        let defaults = Config::default();
        Self {
            frame_timeout: defaults.frame_timeout,
            loop_interval: defaults.loop_interval,
            fade_step: defaults.fade_step.get(),
            brightness: defaults.brightness,
            initial_color: defaults.initial_color,
        }
    }

    /// Sets the partial frame inactivity timeout.
    ///
    /// Default is 1000 ms.
    pub fn frame_timeout(mut self, timeout: D) -> Self {
        self.frame_timeout = timeout;
        self
    }

    /// Sets the suggested pause between iterations.
    ///
    /// Default is 10 ms.
    pub fn loop_interval(mut self, interval: D) -> Self {
        self.loop_interval = interval;
        self
    }

    /// Sets the per-channel change per tick.
    ///
    /// Default is 8.
    pub fn fade_step(mut self, step: u8) -> Self {
        self.fade_step = step;
        self
    }

    /// Sets the fixed output brightness.
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Sets the color rendered at startup.
    pub fn initial_color(mut self, color: Srgb<u8>) -> Self {
        self.initial_color = color;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroFadeStep` - Fade step is zero
    /// * `ZeroLoopInterval` - Loop interval is zero
    pub fn build(self) -> Result<Config<D>, ConfigError> {
        let fade_step = NonZeroU8::new(self.fade_step).ok_or(ConfigError::ZeroFadeStep)?;

        if self.loop_interval.as_millis() == 0 {
            return Err(ConfigError::ZeroLoopInterval);
        }

        Ok(Config {
            frame_timeout: self.frame_timeout,
            loop_interval: self.loop_interval,
            fade_step,
            brightness: self.brightness,
            initial_color: self.initial_color,
        })
    }
}

impl<D: TimeDuration> Default for ConfigBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
