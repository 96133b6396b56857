//! Timing configuration for the UI-layer input consumers, and a builder
//! object which constructs it.

use crate::errors::{ErrorKind, Result};

use ::std::time::Duration;

/// Default maximum time between a button release and the next press for the
/// pair to count as a double-click.
pub const DEFAULT_DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(200);

/// Default interval at which a held key is re-sent to a UI view.
pub const DEFAULT_KEY_REPEAT_INTERVAL: Duration = Duration::from_millis(200);

/// Validated timing configuration. Construct with [`Builder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    double_click_window: Duration,
    key_repeat_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            double_click_window: DEFAULT_DOUBLE_CLICK_WINDOW,
            key_repeat_interval: DEFAULT_KEY_REPEAT_INTERVAL,
        }
    }
}

impl Config {
    /// The maximum elapsed time between a button's release and its next press
    /// that qualifies the pair as a double-click.
    pub const fn double_click_window(&self) -> Duration {
        self.double_click_window
    }

    /// The interval at which a held key is re-sent to a UI view.
    pub const fn key_repeat_interval(&self) -> Duration {
        self.key_repeat_interval
    }
}

/// A builder pattern object which simplifies the process of creating a
/// [`Config`].
///
/// ```
/// use ::std::time::Duration;
/// use ::switchyard::config::Builder;
///
/// let config = Builder::new()
///     .with_double_click_window(Duration::from_millis(350))
///     .build()
///     .expect("Valid configuration");
///
/// assert_eq!(config.double_click_window(), Duration::from_millis(350));
/// assert_eq!(config.key_repeat_interval(), Duration::from_millis(200));
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    double_click_window: Duration,
    key_repeat_interval: Duration,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all properties
    /// until explicitly set.
    pub fn new() -> Self {
        Self {
            double_click_window: DEFAULT_DOUBLE_CLICK_WINDOW,
            key_repeat_interval: DEFAULT_KEY_REPEAT_INTERVAL,
        }
    }

    /// Set the double-click window.
    ///
    /// Defaults to 200ms if not set. A zero window disables double-click
    /// detection entirely.
    pub fn with_double_click_window(self, double_click_window: Duration) -> Self {
        Self {
            double_click_window,
            ..self
        }
    }

    /// Set the interval at which held keys are re-sent to a UI view.
    ///
    /// Defaults to 200ms if not set. Must not be zero.
    pub fn with_key_repeat_interval(self, key_repeat_interval: Duration) -> Self {
        Self {
            key_repeat_interval,
            ..self
        }
    }

    /// Gets the currently set double-click window.
    pub fn double_click_window(&self) -> Duration {
        self.double_click_window
    }

    /// Gets the currently set key repeat interval.
    pub fn key_repeat_interval(&self) -> Duration {
        self.key_repeat_interval
    }

    /// Build a new [`Config`] with the properties of the builder.
    pub fn build(&self) -> Result<Config> {
        if self.key_repeat_interval.is_zero() {
            return Err(ErrorKind::InvalidConfig("key repeat interval must be non-zero").into());
        }

        Ok(Config {
            double_click_window: self.double_click_window,
            key_repeat_interval: self.key_repeat_interval,
        })
    }
}
