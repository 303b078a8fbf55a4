//! Coil lines backed by `embedded-hal` output pins.
//!
//! Any pin implementing [`embedded_hal::digital::OutputPin`] can drive a
//! coil terminal once wrapped in [`HalLine`]. This covers the ESP-IDF
//! `PinDriver` as well as most other HAL crates.

use embedded_hal::digital::{OutputPin, PinState};

use crate::traits::OutputLine;

/// Coil line wrapping an `embedded-hal` output pin.
///
/// Pins arrive already configured as outputs, so [`setup`](OutputLine::setup)
/// only drives the line low to leave the coil de-energized until the first
/// pattern is written.
///
/// # Example
///
/// ```ignore
/// use valve_actuator::hal::HalLine;
/// use valve_actuator::CoilLines;
///
/// let lines = CoilLines::three(HalLine::new(pin_a), HalLine::new(pin_b), HalLine::new(pin_c));
/// ```
#[derive(Debug)]
pub struct HalLine<P> {
    pin: P,
}

impl<P: OutputPin> HalLine<P> {
    /// Wraps an output pin.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputLine for HalLine<P> {
    type Error = P::Error;

    fn setup(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    #[inline]
    fn write(&mut self, level: bool) -> Result<(), Self::Error> {
        self.pin.set_state(PinState::from(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct FakePin {
        high: bool,
        writes: u32,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn setup_drives_low() {
        let mut line = HalLine::new(FakePin {
            high: true,
            writes: 0,
        });
        line.setup().unwrap();
        let pin = line.into_inner();
        assert!(!pin.high);
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn write_maps_levels() {
        let mut line = HalLine::new(FakePin::default());
        line.write(true).unwrap();
        assert!(line.pin.high);
        line.write(false).unwrap();
        assert!(!line.pin.high);
        assert_eq!(line.pin.writes, 2);
    }
}
