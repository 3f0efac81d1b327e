//! Shared test fixtures: a GPIO provider whose pins record every write.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use nema_focuser::motor::{ChannelMap, ChannelPins, PinRole};
use nema_focuser::{ConnectError, FocuserEvent, GpioBank, GpioProvider, MotorChannel};

/// One recorded line write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinWrite {
    pub channel: MotorChannel,
    pub role: PinRole,
    pub high: bool,
}

/// A line that starts failing after a number of successful writes.
#[derive(Debug, Clone, Copy)]
pub struct Fault {
    pub channel: MotorChannel,
    pub role: PinRole,
    pub after: u32,
}

#[derive(Debug, Default)]
pub struct Wiring {
    pub writes: Vec<PinWrite>,
    pub delay_ns: u64,
    pub fault: Option<Fault>,
}

pub type Bus = Rc<RefCell<Wiring>>;

pub struct RecordingPin {
    channel: MotorChannel,
    role: PinRole,
    bus: Bus,
}

impl ErrorType for RecordingPin {
    type Error = ErrorKind;
}

impl RecordingPin {
    fn write(&mut self, high: bool) -> Result<(), ErrorKind> {
        let mut wiring = self.bus.borrow_mut();
        if let Some(fault) = wiring.fault.as_mut() {
            if fault.channel == self.channel && fault.role == self.role {
                if fault.after == 0 {
                    return Err(ErrorKind::Other);
                }
                fault.after -= 1;
            }
        }
        wiring.writes.push(PinWrite {
            channel: self.channel,
            role: self.role,
            high,
        });
        Ok(())
    }
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

pub struct RecordingDelay {
    bus: Bus,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.borrow_mut().delay_ns += u64::from(ns);
    }
}

/// GPIO provider backed by recording pins.
pub struct TestGpio {
    pub bus: Bus,
    pub available: bool,
    pub acquired: u32,
    pub released: u32,
}

impl TestGpio {
    pub fn new() -> Self {
        Self {
            bus: Bus::default(),
            available: true,
            acquired: 0,
            released: 0,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    fn pin(&self, channel: MotorChannel, role: PinRole) -> RecordingPin {
        RecordingPin {
            channel,
            role,
            bus: Rc::clone(&self.bus),
        }
    }
}

impl GpioProvider for TestGpio {
    type Pin = RecordingPin;
    type Delay = RecordingDelay;

    fn acquire(&mut self) -> Result<GpioBank<RecordingPin, RecordingDelay>, ConnectError> {
        if !self.available {
            return Err(ConnectError::unavailable("pigpiod is not running"));
        }
        self.acquired += 1;

        let channels = ChannelMap::from_fn(|channel| {
            ChannelPins::new(
                self.pin(channel, PinRole::Direction),
                self.pin(channel, PinRole::Step),
                self.pin(channel, PinRole::Enable),
            )
        });
        let delay = RecordingDelay {
            bus: Rc::clone(&self.bus),
        };
        Ok(GpioBank::new(channels, delay))
    }

    fn release(&mut self, _bank: GpioBank<RecordingPin, RecordingDelay>) {
        self.released += 1;
    }
}

/// Shared handle on the provider's recorded state.
pub fn bus_of(gpio: &TestGpio) -> Bus {
    Rc::clone(&gpio.bus)
}

/// Number of rising edges on a channel's step line.
pub fn step_pulses(bus: &Bus, channel: MotorChannel) -> usize {
    bus.borrow()
        .writes
        .iter()
        .filter(|w| w.channel == channel && w.role == PinRole::Step && w.high)
        .count()
}

/// Last level written to a line, if any.
pub fn last_level(bus: &Bus, channel: MotorChannel, role: PinRole) -> Option<bool> {
    bus.borrow()
        .writes
        .iter()
        .rev()
        .find(|w| w.channel == channel && w.role == role)
        .map(|w| w.high)
}

/// Every level written to a line, in order.
pub fn levels(bus: &Bus, channel: MotorChannel, role: PinRole) -> Vec<bool> {
    bus.borrow()
        .writes
        .iter()
        .filter(|w| w.channel == channel && w.role == role)
        .map(|w| w.high)
        .collect()
}

pub fn clear_writes(bus: &Bus) {
    bus.borrow_mut().writes.clear();
}

pub fn inject_fault(bus: &Bus, channel: MotorChannel, role: PinRole, after: u32) {
    bus.borrow_mut().fault = Some(Fault { channel, role, after });
}

pub fn clear_fault(bus: &Bus) {
    bus.borrow_mut().fault = None;
}

/// Positions reported by `PositionChanged` events, in order.
pub fn reported_positions(events: &[FocuserEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            FocuserEvent::PositionChanged { position, .. } => Some(*position),
            _ => None,
        })
        .collect()
}
