//! Simulated focuser example.
//!
//! Drives a focuser through a relative move, an abort and a channel change
//! using the same timer loop the device-integration layer would run.
//!
//! Pins are simulated; no hardware is required.

use nema_focuser::motor::{ChannelMap, ChannelPins};
use nema_focuser::{
    ConnectError, FnSink, FocusDirection, Focuser, FocuserEvent, GpioBank, GpioProvider,
    MotionState, MotorChannel,
};

/// Delay provider backed by the OS scheduler.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that only remembers its level.
struct SimPin {
    high: bool,
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

/// GPIO provider that hands out simulated pins.
struct SimGpio;

impl GpioProvider for SimGpio {
    type Pin = SimPin;
    type Delay = SleepDelay;

    fn acquire(&mut self) -> Result<GpioBank<SimPin, SleepDelay>, ConnectError> {
        let channels = ChannelMap::from_fn(|channel| {
            let pinout = channel.pinout();
            println!(
                "  {}: DIR=GPIO{} STEP=GPIO{} EN=GPIO{}",
                channel, pinout.direction, pinout.step, pinout.enable
            );
            ChannelPins::new(
                SimPin { high: false },
                SimPin { high: false },
                SimPin { high: false },
            )
        });
        Ok(GpioBank::new(channels, SleepDelay))
    }

    fn release(&mut self, _bank: GpioBank<SimPin, SleepDelay>) {
        println!("  GPIO released");
    }
}

fn print_event(event: FocuserEvent) {
    match event {
        FocuserEvent::PositionChanged {
            position,
            state: MotionState::Idle,
        } => println!("  position {} (idle)", position),
        FocuserEvent::PositionChanged { .. } => {}
        other => println!("  event: {:?}", other),
    }
}

fn main() {
    println!("=== Simulated Focuser Example ===\n");

    let mut focuser = Focuser::builder()
        .gpio(SimGpio)
        .events(FnSink(print_event))
        .step_delay_us(200)
        .position(1000)
        .build()
        .expect("Failed to build focuser");

    println!("Connecting:");
    focuser.connect().expect("Failed to connect");
    println!(
        "Active channel: {}, worst-case tick: {} us",
        focuser.active_channel(),
        focuser.batch_duration_us()
    );

    println!("\n=== Relative move outward by 250 ===");
    focuser
        .move_relative(FocusDirection::Outward, 250)
        .expect("Failed to start move");
    loop {
        let next = focuser.timer_hit();
        if next.state == MotionState::Idle {
            break;
        }
        std::thread::sleep(next.delay);
    }
    println!("Position: {}", focuser.position());

    println!("\n=== Absolute move to 0, aborted after 5 ticks ===");
    focuser.move_absolute(0).expect("Failed to start move");
    for _ in 0..5 {
        let next = focuser.timer_hit();
        std::thread::sleep(next.delay);
    }
    focuser.abort();
    println!("Position after abort: {}", focuser.position());

    println!("\n=== Switch to {} ===", MotorChannel::Y);
    focuser
        .select_channel(MotorChannel::Y)
        .expect("Failed to select channel");
    focuser.move_absolute(1100).expect("Failed to start move");
    let ticks = focuser.run_until_idle();
    println!("Reached {} in {} ticks", focuser.position(), ticks);

    #[cfg(feature = "std")]
    {
        println!("\n=== Configuration to persist ===");
        match nema_focuser::config::to_toml_string(&focuser.snapshot_config()) {
            Ok(toml) => println!("{}", toml),
            Err(e) => println!("Failed to render configuration: {}", e),
        }
    }

    println!("Disconnecting:");
    focuser.disconnect();
}
