//! Focuser driver: the motion-control state machine.
//!
//! All motion progress happens inside [`Focuser::timer_hit`], which the
//! integration layer calls from a single repeating timer. Each tick emits at
//! most [`STEPS_PER_TICK`] blocking pulses, so abort only takes effect
//! between batches.

use crate::config::units::{Range, STEPS_PER_REVOLUTION_RANGE, STEP_DELAY_RANGE_US};
use crate::config::{validate_config, Applied, FocuserConfig, Microsteps};
use crate::error::{ConfigError, ConnectError, Error, MotorError, Result};
use crate::motion::{FocusDirection, MotionExecutor, MovePlan, STEPS_PER_TICK};
use crate::motor::{
    ChannelSelector, GpioBank, GpioProvider, MotionState, MotorChannel, Position,
    StepPulseGenerator, StepTiming,
};

use super::builder::FocuserBuilder;
use super::capability::{Capabilities, FocuserDevice, MotionResult, NextTick};
use super::events::{ConfigField, EventSink, FocuserEvent, NoEvents};

/// Stepper focuser on one of three HAT channels.
///
/// Generic over:
/// - `G`: source of the GPIO pins (must implement [`GpioProvider`])
/// - `E`: receiver of [`FocuserEvent`]s (defaults to [`NoEvents`])
///
/// Owns the position, the in-flight move and the pin bank while connected.
/// Only one move is ever in flight; a new request replaces the current one.
pub struct Focuser<G, E = NoEvents>
where
    G: GpioProvider,
    E: EventSink,
{
    /// Pin source, kept for reconnects.
    gpio: G,

    /// Acquired pins; `Some` while connected.
    bank: Option<GpioBank<G::Pin, G::Delay>>,

    /// Event receiver.
    events: E,

    /// Settings as last applied.
    config: FocuserConfig,

    /// Active motor channel.
    selector: ChannelSelector,

    /// Step pulse timing.
    pulse: StepPulseGenerator,

    /// Current position, advanced one step per emitted pulse.
    position: Position,

    /// In-flight move; `Some` exactly while moving.
    executor: Option<MotionExecutor>,
}

impl<G, E> Focuser<G, E>
where
    G: GpioProvider,
    E: EventSink,
{
    /// Create a disconnected focuser from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(gpio: G, events: E, config: FocuserConfig) -> Result<Self> {
        validate_config(&config)?;

        Ok(Self {
            gpio,
            bank: None,
            events,
            selector: ChannelSelector::new(config.channel),
            pulse: StepPulseGenerator::new(StepTiming::new(config.step_delay_us)),
            position: Position::new(config.position, config.max_position),
            executor: None,
            config,
        })
    }

    /// Motion capabilities of this driver.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::ABS_MOVE
            .union(Capabilities::REL_MOVE)
            .union(Capabilities::ABORT)
            .union(Capabilities::SYNC)
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> u32 {
        self.position.steps()
    }

    /// Get the travel limit in steps.
    #[inline]
    pub fn max_position(&self) -> u32 {
        self.position.max()
    }

    /// Target of the move in progress, if any.
    pub fn target_position(&self) -> Option<u32> {
        self.executor.as_ref().map(|e| e.plan().target)
    }

    /// Get the current motion state.
    #[inline]
    pub fn motion_state(&self) -> MotionState {
        if self.executor.is_some() {
            MotionState::Moving
        } else {
            MotionState::Idle
        }
    }

    /// Check if a move is in progress.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.executor.is_some()
    }

    /// Check if the pin interface is held.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.bank.is_some()
    }

    /// Currently selected motor channel.
    #[inline]
    pub fn active_channel(&self) -> MotorChannel {
        self.selector.active()
    }

    /// Current step timing.
    #[inline]
    pub fn step_timing(&self) -> StepTiming {
        self.pulse.timing()
    }

    /// Settings as last applied. `position` holds the value from the last
    /// disconnect; see [`snapshot_config`](Self::snapshot_config).
    pub fn config(&self) -> &FocuserConfig {
        &self.config
    }

    /// Settings with the current position, ready to persist.
    pub fn snapshot_config(&self) -> FocuserConfig {
        FocuserConfig {
            position: self.position.steps(),
            max_position: self.position.max(),
            ..self.config.clone()
        }
    }

    /// Get the event sink.
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Get the event sink mutably (e.g. to drain recorded events).
    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Get the GPIO provider.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Acquire the pin interface and disable all three motors.
    ///
    /// Does nothing if already connected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Connect` if the pins cannot be acquired or driven to
    /// their disabled state. No partial state is retained.
    pub fn connect(&mut self) -> Result<()> {
        if self.bank.is_some() {
            return Ok(());
        }

        let mut bank = match self.gpio.acquire() {
            Ok(bank) => bank,
            Err(e) => {
                error!("Failed to initialize GPIO. Make sure the GPIO daemon is running.");
                self.events.emit(FocuserEvent::ConnectionFailed(e.clone()));
                return Err(e.into());
            }
        };

        if let Err(fault) = bank.disable_all() {
            error!("Failed to disable motors during connect: {:?}", fault);
            self.gpio.release(bank);
            let e = ConnectError::PinSetup(fault);
            self.events.emit(FocuserEvent::ConnectionFailed(e.clone()));
            return Err(e.into());
        }

        self.bank = Some(bank);
        info!("Focuser connected on {}", self.selector.active());
        self.events.emit(FocuserEvent::Connected);
        self.events.emit(FocuserEvent::PositionChanged {
            position: self.position.steps(),
            state: MotionState::Idle,
        });
        Ok(())
    }

    /// Disable all motors and release the pin interface.
    ///
    /// A move in progress is abandoned; the position is kept in memory.
    /// Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        let Some(mut bank) = self.bank.take() else {
            return;
        };

        if self.executor.take().is_some() {
            self.events.emit(FocuserEvent::PositionChanged {
                position: self.position.steps(),
                state: MotionState::Idle,
            });
            self.events.emit(FocuserEvent::MotionAborted);
        }

        if let Err(fault) = bank.disable_all() {
            warn!("Failed to disable motors on disconnect: {:?}", fault);
        }
        self.gpio.release(bank);
        self.config.position = self.position.steps();

        info!("Focuser disconnected at position {}", self.position.steps());
        self.events.emit(FocuserEvent::Disconnected);
    }

    /// Move to an absolute position, clamped to `[0, max_position]`.
    ///
    /// A target equal to the current position completes immediately without
    /// pulses. Otherwise the direction line is set once for the whole move,
    /// the active motor is enabled and stepping continues from the timer.
    /// A request while moving replaces the current target and direction.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::NotConnected` when disconnected, or
    /// `MotorError::PinWrite` if the direction or enable line cannot be
    /// written (the focuser is left idle).
    pub fn move_absolute(&mut self, target: u32) -> Result<MotionResult> {
        let channel = self.selector.active();
        let Some(bank) = self.bank.as_mut() else {
            return Err(MotorError::NotConnected.into());
        };

        let Some(plan) = MovePlan::absolute(&self.position, target) else {
            if self.executor.take().is_some() {
                let disabled = bank.set_enabled(channel, false);
                debug!("Move retargeted to current position {}", self.position.steps());
                self.events.emit(FocuserEvent::PositionChanged {
                    position: self.position.steps(),
                    state: MotionState::Idle,
                });
                self.events.emit(FocuserEvent::MotionComplete);
                if let Err(fault) = disabled {
                    error!("Failed to disable motor: {:?}", fault);
                    self.events.emit(FocuserEvent::MotionFault(fault));
                }
            }
            return Ok(MotionResult::Complete);
        };

        let forward = plan.direction.is_forward() != self.config.reverse_direction;
        let started = bank
            .set_direction(channel, forward)
            .and_then(|()| bank.set_enabled(channel, true));

        if let Err(fault) = started {
            let was_moving = self.executor.take().is_some();
            let _ = bank.set_enabled(channel, false);
            error!("Failed to start move on {}: {:?}", channel, fault);
            if was_moving {
                self.events.emit(FocuserEvent::PositionChanged {
                    position: self.position.steps(),
                    state: MotionState::Idle,
                });
            }
            self.events.emit(FocuserEvent::MotionFault(fault));
            return Err(fault.into());
        }

        debug!(
            "Moving to absolute position: {} (current: {})",
            plan.target,
            self.position.steps()
        );
        self.executor = Some(MotionExecutor::new(plan));
        self.events.emit(FocuserEvent::PositionChanged {
            position: self.position.steps(),
            state: MotionState::Moving,
        });
        Ok(MotionResult::InProgress)
    }

    /// Move by `delta` steps. Inward floors at 0, outward caps at the maximum.
    ///
    /// # Errors
    ///
    /// Same as [`move_absolute`](Self::move_absolute).
    pub fn move_relative(&mut self, direction: FocusDirection, delta: u32) -> Result<MotionResult> {
        let target = self.position.offset(direction.into(), delta);
        self.move_absolute(target)
    }

    /// Stop the move in progress and disable the motor.
    ///
    /// Does nothing while idle. The position keeps every pulse already emitted.
    pub fn abort(&mut self) {
        if self.executor.take().is_none() {
            return;
        }

        let channel = self.selector.active();
        let disabled = match self.bank.as_mut() {
            Some(bank) => bank.set_enabled(channel, false),
            None => Ok(()),
        };

        info!("Focuser movement aborted at {}", self.position.steps());
        self.events.emit(FocuserEvent::PositionChanged {
            position: self.position.steps(),
            state: MotionState::Idle,
        });
        self.events.emit(FocuserEvent::MotionAborted);

        if let Err(fault) = disabled {
            error!("Failed to disable motor after abort: {:?}", fault);
            self.events.emit(FocuserEvent::MotionFault(fault));
        }
    }

    /// Advance motion by one timer tick.
    ///
    /// While moving: completes the move if the target was reached, otherwise
    /// emits one batch of pulses and reports the new position. While idle:
    /// does nothing. A pin failure stops the move, disables the motor,
    /// reports `MotionFault` and leaves the focuser idle.
    ///
    /// Returns when the timer should fire next.
    pub fn timer_hit(&mut self) -> NextTick {
        let idle = NextTick::idle(self.config.poll_period_ms);
        let channel = self.selector.active();
        let (Some(executor), Some(bank)) = (self.executor.as_mut(), self.bank.as_mut()) else {
            return idle;
        };

        if executor.is_complete(&self.position) {
            self.executor = None;
            let disabled = bank.set_enabled(channel, false);
            debug!("Target position reached: {}", self.position.steps());
            self.events.emit(FocuserEvent::PositionChanged {
                position: self.position.steps(),
                state: MotionState::Idle,
            });
            self.events.emit(FocuserEvent::MotionComplete);
            if let Err(fault) = disabled {
                error!("Failed to disable motor: {:?}", fault);
                self.events.emit(FocuserEvent::MotionFault(fault));
            }
            return idle;
        }

        let generator = &self.pulse;
        let batch = executor.run_batch(&mut self.position, || bank.pulse(channel, generator));
        match batch {
            Ok(_) => {
                self.events.emit(FocuserEvent::PositionChanged {
                    position: self.position.steps(),
                    state: MotionState::Moving,
                });
                NextTick::moving()
            }
            Err(fault) => {
                self.executor = None;
                if bank.set_enabled(channel, false).is_err() {
                    error!("Failed to disable {} after pin fault", channel);
                }
                error!(
                    "Pin fault during move: {:?}; stopped at {}",
                    fault,
                    self.position.steps()
                );
                self.events.emit(FocuserEvent::PositionChanged {
                    position: self.position.steps(),
                    state: MotionState::Idle,
                });
                self.events.emit(FocuserEvent::MotionFault(fault));
                idle
            }
        }
    }

    /// Drive timer ticks until the focuser is idle (blocking).
    ///
    /// Returns the number of ticks executed.
    pub fn run_until_idle(&mut self) -> u32 {
        let mut ticks = 0;
        while self.is_moving() {
            self.timer_hit();
            ticks += 1;
        }
        ticks
    }

    /// Redefine the current position without moving.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Busy` while moving, or
    /// `ConfigError::PositionOutOfRange` for a value above the maximum under
    /// the `Reject` policy. Returns the applied position.
    pub fn sync(&mut self, position: u32) -> Result<u32> {
        if self.is_moving() {
            return Err(MotorError::Busy.into());
        }

        let max = self.position.max();
        let applied = self.apply_policy(
            "position",
            position,
            Range::new(0, max),
            ConfigError::PositionOutOfRange { position, max },
        )?;

        self.position.set_steps(applied);
        info!("Position synced to {}", applied);
        self.events.emit(FocuserEvent::PositionChanged {
            position: applied,
            state: MotionState::Idle,
        });
        Ok(applied)
    }

    /// Change the travel limit. The position is pulled inside the new limit.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Busy` while moving or
    /// `ConfigError::InvalidMaxPosition` for zero.
    pub fn set_max_position(&mut self, max: u32) -> Result<()> {
        if self.is_moving() {
            return Err(MotorError::Busy.into());
        }
        if max == 0 {
            return Err(ConfigError::InvalidMaxPosition(max).into());
        }

        let before = self.position.steps();
        self.position.set_max(max);
        self.config.max_position = max;
        info!("Max position set to {}", max);
        self.events
            .emit(FocuserEvent::ConfigurationChanged(ConfigField::MaxPosition));
        if self.position.steps() != before {
            self.events.emit(FocuserEvent::PositionChanged {
                position: self.position.steps(),
                state: MotionState::Idle,
            });
        }
        Ok(())
    }

    /// Select the motor channel used by all subsequent pin operations.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::ChannelBusy` while moving.
    pub fn select_channel(&mut self, channel: MotorChannel) -> Result<()> {
        if self.is_moving() {
            warn!("Refusing to select {} while moving", channel);
            return Err(MotorError::ChannelBusy.into());
        }

        if self.selector.select(channel) {
            self.config.channel = channel;
            info!("Selected {}", channel);
            self.events
                .emit(FocuserEvent::ConfigurationChanged(ConfigField::Channel));
        }
        Ok(())
    }

    /// Set the delay after each step pulse. Takes effect on the next pulse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StepDelayOutOfRange` for values outside
    /// [10, 10000] under the `Reject` policy. Returns the applied value.
    pub fn set_step_delay_us(&mut self, value: u32) -> Result<u32> {
        let applied = self.apply_policy(
            ConfigField::StepDelay.name(),
            value,
            STEP_DELAY_RANGE_US,
            ConfigError::StepDelayOutOfRange(value),
        )?;

        self.pulse.set_step_delay_us(applied);
        self.config.step_delay_us = applied;
        info!("Step delay set to {} us", applied);
        self.events
            .emit(FocuserEvent::ConfigurationChanged(ConfigField::StepDelay));
        Ok(applied)
    }

    /// Set the motor's steps per revolution (reported to clients only).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::StepsPerRevolutionOutOfRange` for values outside
    /// [100, 400] under the `Reject` policy. Returns the applied value.
    pub fn set_steps_per_revolution(&mut self, value: u32) -> Result<u32> {
        let applied = self.apply_policy(
            ConfigField::StepsPerRevolution.name(),
            value,
            STEPS_PER_REVOLUTION_RANGE,
            ConfigError::StepsPerRevolutionOutOfRange(value),
        )?;

        self.config.steps_per_revolution = applied;
        info!("Steps per revolution set to {}", applied);
        self.events.emit(FocuserEvent::ConfigurationChanged(
            ConfigField::StepsPerRevolution,
        ));
        Ok(applied)
    }

    /// Set the microstepping divisor.
    ///
    /// The mode is stored and reported; pulse count and timing are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` unless the value is 1, 2, 4, 8 or 16.
    pub fn set_microsteps(&mut self, value: u16) -> Result<Microsteps> {
        let microsteps = Microsteps::new(value)?;

        self.config.microsteps = microsteps;
        info!("Microstepping mode set to 1/{}", value);
        self.events
            .emit(FocuserEvent::ConfigurationChanged(ConfigField::Microsteps));
        Ok(microsteps)
    }

    /// Worst-case blocking time of one tick, in microseconds.
    pub fn batch_duration_us(&self) -> u32 {
        STEPS_PER_TICK.saturating_mul(self.pulse.timing().period_us())
    }

    fn apply_policy(
        &self,
        field: &'static str,
        value: u32,
        range: Range,
        rejected: ConfigError,
    ) -> Result<u32> {
        match self.config.out_of_range.apply(value, range) {
            Applied::Accepted(v) => Ok(v),
            Applied::Clamped(v) => {
                warn!("{} {} out of range, clamped to {}", field, value, v);
                Ok(v)
            }
            Applied::Rejected => {
                warn!("{} {} out of range, rejected", field, value);
                Err(Error::Config(rejected))
            }
        }
    }
}

impl<G> Focuser<G, NoEvents>
where
    G: GpioProvider,
{
    /// Create a builder for a focuser.
    pub fn builder() -> FocuserBuilder<G> {
        FocuserBuilder::new()
    }
}

impl<G, E> Drop for Focuser<G, E>
where
    G: GpioProvider,
    E: EventSink,
{
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<G, E> FocuserDevice for Focuser<G, E>
where
    G: GpioProvider,
    E: EventSink,
{
    fn capabilities(&self) -> Capabilities {
        Focuser::capabilities(self)
    }

    fn connect(&mut self) -> Result<()> {
        Focuser::connect(self)
    }

    fn disconnect(&mut self) {
        Focuser::disconnect(self)
    }

    fn is_connected(&self) -> bool {
        Focuser::is_connected(self)
    }

    fn move_absolute(&mut self, target: u32) -> Result<MotionResult> {
        Focuser::move_absolute(self, target)
    }

    fn move_relative(&mut self, direction: FocusDirection, delta: u32) -> Result<MotionResult> {
        Focuser::move_relative(self, direction, delta)
    }

    fn abort(&mut self) {
        Focuser::abort(self)
    }

    fn sync(&mut self, position: u32) -> Result<u32> {
        Focuser::sync(self, position)
    }

    fn select_channel(&mut self, channel: MotorChannel) -> Result<()> {
        Focuser::select_channel(self, channel)
    }

    fn set_step_delay_us(&mut self, value: u32) -> Result<u32> {
        Focuser::set_step_delay_us(self, value)
    }

    fn set_steps_per_revolution(&mut self, value: u32) -> Result<u32> {
        Focuser::set_steps_per_revolution(self, value)
    }

    fn set_microsteps(&mut self, value: u16) -> Result<()> {
        Focuser::set_microsteps(self, value).map(|_| ())
    }

    fn timer_hit(&mut self) -> NextTick {
        Focuser::timer_hit(self)
    }

    fn position(&self) -> u32 {
        Focuser::position(self)
    }

    fn motion_state(&self) -> MotionState {
        Focuser::motion_state(self)
    }
}
