//! Step pulse generation.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{DEFAULT_STEP_DELAY_US, PULSE_WIDTH_US, STEP_DELAY_RANGE_US};

/// Step timing: fixed pulse width plus a configurable inter-step delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    step_delay_us: u32,
}

impl StepTiming {
    /// Create timing with the given inter-step delay, clamped to [10, 10000] us.
    pub fn new(step_delay_us: u32) -> Self {
        Self {
            step_delay_us: STEP_DELAY_RANGE_US.clamp(step_delay_us),
        }
    }

    /// Delay after each pulse in microseconds.
    #[inline]
    pub fn step_delay_us(&self) -> u32 {
        self.step_delay_us
    }

    /// Step line high time in microseconds.
    #[inline]
    pub const fn pulse_width_us(&self) -> u32 {
        PULSE_WIDTH_US
    }

    /// Time one pulse occupies the caller, in microseconds.
    #[inline]
    pub fn period_us(&self) -> u32 {
        self.step_delay_us + PULSE_WIDTH_US
    }
}

impl Default for StepTiming {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY_US)
    }
}

/// Produces single step pulses on a step line.
///
/// Each pulse blocks the caller for the pulse width plus the step delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepPulseGenerator {
    timing: StepTiming,
}

impl StepPulseGenerator {
    /// Create a generator with the given timing.
    pub fn new(timing: StepTiming) -> Self {
        Self { timing }
    }

    /// Current timing.
    #[inline]
    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    /// Change the inter-step delay; takes effect on the next pulse.
    pub fn set_step_delay_us(&mut self, step_delay_us: u32) {
        self.timing = StepTiming::new(step_delay_us);
    }

    /// Emit one pulse: step high, hold, step low, wait the step delay.
    pub fn pulse<P, D>(&self, step_pin: &mut P, delay: &mut D) -> Result<(), P::Error>
    where
        P: OutputPin,
        D: DelayNs,
    {
        step_pin.set_high()?;
        delay.delay_us(self.timing.pulse_width_us());
        step_pin.set_low()?;
        delay.delay_us(self.timing.step_delay_us());
        Ok(())
    }
}
