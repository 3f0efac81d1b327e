//! Motor channel identities and their pin triples.
//!
//! The Stepper Motor HAT (B) wires three independent DRV8825 drivers. Each
//! channel has a direction line, a step line and an active-low enable line.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the three physical motor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum MotorChannel {
    /// Motor 1 connector.
    #[default]
    X,
    /// Motor 2 connector.
    Y,
    /// Motor 3 connector.
    Z,
}

impl MotorChannel {
    /// All channels in connector order.
    pub const ALL: [MotorChannel; 3] = [MotorChannel::X, MotorChannel::Y, MotorChannel::Z];

    /// BCM pin numbers used by the Waveshare Stepper Motor HAT (B).
    pub const fn pinout(self) -> ChannelPinout {
        match self {
            MotorChannel::X => ChannelPinout { direction: 13, step: 19, enable: 12 },
            MotorChannel::Y => ChannelPinout { direction: 24, step: 18, enable: 4 },
            MotorChannel::Z => ChannelPinout { direction: 21, step: 26, enable: 25 },
        }
    }

    /// Channel name as shown to clients.
    pub const fn as_str(self) -> &'static str {
        match self {
            MotorChannel::X => "Motor X",
            MotorChannel::Y => "Motor Y",
            MotorChannel::Z => "Motor Z",
        }
    }
}

impl fmt::Display for MotorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a line within a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// DIR line (high = forward).
    Direction,
    /// STEP line.
    Step,
    /// EN line (active low).
    Enable,
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PinRole::Direction => "direction",
            PinRole::Step => "step",
            PinRole::Enable => "enable",
        })
    }
}

/// GPIO numbers of one channel, for providers that open pins by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPinout {
    /// Direction line GPIO.
    pub direction: u8,
    /// Step line GPIO.
    pub step: u8,
    /// Enable line GPIO.
    pub enable: u8,
}

/// The three output pins of one channel.
#[derive(Debug)]
pub struct ChannelPins<P> {
    /// Direction line.
    pub direction: P,
    /// Step line.
    pub step: P,
    /// Enable line (active low).
    pub enable: P,
}

impl<P> ChannelPins<P> {
    /// Group the three lines of a channel.
    pub fn new(direction: P, step: P, enable: P) -> Self {
        Self { direction, step, enable }
    }
}

/// Total mapping from channel identity to a value.
#[derive(Debug, Clone, Default)]
pub struct ChannelMap<T> {
    x: T,
    y: T,
    z: T,
}

impl<T> ChannelMap<T> {
    /// Create a mapping with one value per channel.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Build a mapping by calling `f` for each channel.
    pub fn from_fn(mut f: impl FnMut(MotorChannel) -> T) -> Self {
        Self {
            x: f(MotorChannel::X),
            y: f(MotorChannel::Y),
            z: f(MotorChannel::Z),
        }
    }

    /// Value for a channel.
    #[inline]
    pub fn get(&self, channel: MotorChannel) -> &T {
        match channel {
            MotorChannel::X => &self.x,
            MotorChannel::Y => &self.y,
            MotorChannel::Z => &self.z,
        }
    }

    /// Mutable value for a channel.
    #[inline]
    pub fn get_mut(&mut self, channel: MotorChannel) -> &mut T {
        match channel {
            MotorChannel::X => &mut self.x,
            MotorChannel::Y => &mut self.y,
            MotorChannel::Z => &mut self.z,
        }
    }

    /// Iterate channels with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (MotorChannel, &mut T)> {
        [
            (MotorChannel::X, &mut self.x),
            (MotorChannel::Y, &mut self.y),
            (MotorChannel::Z, &mut self.z),
        ]
        .into_iter()
    }

    /// Consume the mapping, yielding values in channel order.
    pub fn into_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

/// Holds the active channel; all pin operations resolve through it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSelector {
    active: MotorChannel,
}

impl ChannelSelector {
    /// Create a selector with `channel` active.
    pub const fn new(channel: MotorChannel) -> Self {
        Self { active: channel }
    }

    /// Currently active channel.
    #[inline]
    pub fn active(&self) -> MotorChannel {
        self.active
    }

    /// Make `channel` active. Returns `true` if the selection changed.
    pub fn select(&mut self, channel: MotorChannel) -> bool {
        let changed = self.active != channel;
        self.active = channel;
        changed
    }

    /// Resolve the active channel's entry in a mapping.
    #[inline]
    pub fn resolve<'a, T>(&self, map: &'a mut ChannelMap<T>) -> &'a mut T {
        map.get_mut(self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hat_pinout() {
        assert_eq!(
            MotorChannel::X.pinout(),
            ChannelPinout { direction: 13, step: 19, enable: 12 }
        );
        assert_eq!(MotorChannel::Y.pinout().enable, 4);
        assert_eq!(MotorChannel::Z.pinout().step, 26);
    }

    #[test]
    fn test_selector_resolves_active_entry() {
        let mut map = ChannelMap::from_fn(|c| c.pinout().step);
        let mut selector = ChannelSelector::default();

        assert_eq!(*selector.resolve(&mut map), 19);
        assert!(selector.select(MotorChannel::Z));
        assert_eq!(*selector.resolve(&mut map), 26);
        assert!(!selector.select(MotorChannel::Z));
    }

    #[test]
    fn test_iter_mut_visits_every_channel() {
        let mut map = ChannelMap::new(0u8, 0, 0);
        for (channel, value) in map.iter_mut() {
            *value = channel.pinout().enable;
        }
        assert_eq!(map.into_array(), [12, 4, 25]);
    }
}
