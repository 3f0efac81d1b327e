//! Builder pattern for Focuser.

use crate::config::{FocuserConfig, LimitPolicy, Microsteps};
use crate::error::{ConfigError, Error, Result};
use crate::motor::{GpioProvider, MotorChannel};

use super::driver::Focuser;
use super::events::{EventSink, NoEvents};

/// Builder for creating Focuser instances.
///
/// Starts from [`FocuserConfig::default`]; individual setters override single
/// fields. The configuration is validated by [`build`](Self::build).
pub struct FocuserBuilder<G, E = NoEvents>
where
    G: GpioProvider,
    E: EventSink,
{
    gpio: Option<G>,
    events: E,
    config: FocuserConfig,
}

impl<G> Default for FocuserBuilder<G, NoEvents>
where
    G: GpioProvider,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<G> FocuserBuilder<G, NoEvents>
where
    G: GpioProvider,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            gpio: None,
            events: NoEvents,
            config: FocuserConfig::default(),
        }
    }
}

impl<G, E> FocuserBuilder<G, E>
where
    G: GpioProvider,
    E: EventSink,
{
    /// Set the GPIO provider.
    pub fn gpio(mut self, gpio: G) -> Self {
        self.gpio = Some(gpio);
        self
    }

    /// Set the event sink.
    pub fn events<S: EventSink>(self, events: S) -> FocuserBuilder<G, S> {
        FocuserBuilder {
            gpio: self.gpio,
            events,
            config: self.config,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: FocuserConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the delay after each step pulse in microseconds.
    pub fn step_delay_us(mut self, value: u32) -> Self {
        self.config.step_delay_us = value;
        self
    }

    /// Set steps per revolution.
    pub fn steps_per_revolution(mut self, value: u32) -> Self {
        self.config.steps_per_revolution = value;
        self
    }

    /// Set microstep configuration.
    pub fn microsteps(mut self, microsteps: Microsteps) -> Self {
        self.config.microsteps = microsteps;
        self
    }

    /// Set the initial motor channel.
    pub fn channel(mut self, channel: MotorChannel) -> Self {
        self.config.channel = channel;
        self
    }

    /// Set the travel limit in steps.
    pub fn max_position(mut self, max: u32) -> Self {
        self.config.max_position = max;
        self
    }

    /// Set the restored position in steps.
    pub fn position(mut self, position: u32) -> Self {
        self.config.position = position;
        self
    }

    /// Set the idle timer period in milliseconds.
    pub fn poll_period_ms(mut self, period: u32) -> Self {
        self.config.poll_period_ms = period;
        self
    }

    /// Set direction inversion.
    pub fn reverse_direction(mut self, reverse: bool) -> Self {
        self.config.reverse_direction = reverse;
        self
    }

    /// Set how runtime setters treat out-of-range values.
    pub fn out_of_range(mut self, policy: LimitPolicy) -> Self {
        self.config.out_of_range = policy;
        self
    }

    /// Build the Focuser (disconnected).
    ///
    /// # Errors
    ///
    /// Returns an error if the GPIO provider is missing or the configuration
    /// fails validation.
    pub fn build(self) -> Result<Focuser<G, E>> {
        let gpio = self
            .gpio
            .ok_or(Error::Config(ConfigError::MissingField("gpio")))?;

        Focuser::new(gpio, self.events, self.config)
    }
}
