//! Pin interface: acquisition of the GPIO resource and the pins it hands out.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{ConnectError, MotorError};

use super::channel::{ChannelMap, ChannelPins, MotorChannel, PinRole};
use super::pulse::StepPulseGenerator;

/// Source of the GPIO resource (e.g. a GPIO daemon or character device).
///
/// `acquire` must hand out all three channels' lines configured as outputs.
/// `release` gives them back; it is called exactly once per acquired bank.
pub trait GpioProvider {
    /// Output pin type used for every line.
    type Pin: OutputPin;
    /// Microsecond delay provider.
    type Delay: DelayNs;

    /// Acquire the pins of all three channels.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError::GpioUnavailable` if the backend cannot be opened.
    fn acquire(&mut self) -> Result<GpioBank<Self::Pin, Self::Delay>, ConnectError>;

    /// Release a previously acquired bank.
    fn release(&mut self, bank: GpioBank<Self::Pin, Self::Delay>);
}

/// All output lines of the HAT plus the delay primitive.
#[derive(Debug)]
pub struct GpioBank<P, D> {
    channels: ChannelMap<ChannelPins<P>>,
    delay: D,
}

impl<P, D> GpioBank<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a bank from the three channel pin triples.
    pub fn new(channels: ChannelMap<ChannelPins<P>>, delay: D) -> Self {
        Self { channels, delay }
    }

    /// Drive every enable line high (all motors disabled).
    ///
    /// Attempts every channel; reports the first failure.
    pub fn disable_all(&mut self) -> Result<(), MotorError> {
        let mut first_error = None;
        for (channel, pins) in self.channels.iter_mut() {
            if pins.enable.set_high().is_err() && first_error.is_none() {
                first_error = Some(MotorError::PinWrite {
                    channel,
                    line: PinRole::Enable,
                });
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Enable or disable one channel's driver (active low).
    pub fn set_enabled(&mut self, channel: MotorChannel, enabled: bool) -> Result<(), MotorError> {
        let pin = &mut self.channels.get_mut(channel).enable;
        let result = if enabled { pin.set_low() } else { pin.set_high() };
        result.map_err(|_| MotorError::PinWrite {
            channel,
            line: PinRole::Enable,
        })
    }

    /// Set one channel's direction line (high = forward).
    pub fn set_direction(&mut self, channel: MotorChannel, forward: bool) -> Result<(), MotorError> {
        let pin = &mut self.channels.get_mut(channel).direction;
        let result = if forward { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| MotorError::PinWrite {
            channel,
            line: PinRole::Direction,
        })
    }

    /// Emit one step pulse on a channel.
    pub fn pulse(
        &mut self,
        channel: MotorChannel,
        generator: &StepPulseGenerator,
    ) -> Result<(), MotorError> {
        let step = &mut self.channels.get_mut(channel).step;
        generator
            .pulse(step, &mut self.delay)
            .map_err(|_| MotorError::PinWrite {
                channel,
                line: PinRole::Step,
            })
    }

    /// Split the bank back into its pins and delay.
    pub fn into_parts(self) -> (ChannelMap<ChannelPins<P>>, D) {
        (self.channels, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    fn quiet() -> PinMock {
        PinMock::new(&[])
    }

    fn finish(bank: GpioBank<PinMock, NoopDelay>) {
        let (channels, _) = bank.into_parts();
        for mut pins in channels.into_array() {
            pins.direction.done();
            pins.step.done();
            pins.enable.done();
        }
    }

    #[test]
    fn test_disable_all_drives_enables_high() {
        let high = || PinMock::new(&[Transaction::set(State::High)]);
        let mut bank = GpioBank::new(
            ChannelMap::new(
                ChannelPins::new(quiet(), quiet(), high()),
                ChannelPins::new(quiet(), quiet(), high()),
                ChannelPins::new(quiet(), quiet(), high()),
            ),
            NoopDelay::new(),
        );

        bank.disable_all().unwrap();

        finish(bank);
    }

    #[test]
    fn test_enable_is_active_low() {
        let enable = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
        ]);
        let mut bank = GpioBank::new(
            ChannelMap::new(
                ChannelPins::new(quiet(), quiet(), quiet()),
                ChannelPins::new(quiet(), quiet(), enable),
                ChannelPins::new(quiet(), quiet(), quiet()),
            ),
            NoopDelay::new(),
        );

        bank.set_enabled(MotorChannel::Y, true).unwrap();
        bank.set_enabled(MotorChannel::Y, false).unwrap();

        finish(bank);
    }

    #[test]
    fn test_pulse_targets_requested_channel() {
        let step = PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);
        let dir = PinMock::new(&[Transaction::set(State::Low)]);
        let mut bank = GpioBank::new(
            ChannelMap::new(
                ChannelPins::new(quiet(), quiet(), quiet()),
                ChannelPins::new(quiet(), quiet(), quiet()),
                ChannelPins::new(dir, step, quiet()),
            ),
            NoopDelay::new(),
        );

        bank.set_direction(MotorChannel::Z, false).unwrap();
        bank.pulse(MotorChannel::Z, &StepPulseGenerator::default()).unwrap();

        finish(bank);
    }
}
