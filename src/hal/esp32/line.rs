//! GPIO coil lines for ESP32.

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::sys::EspError;

use crate::hal::HalLine;

/// Coil line on an ESP32 GPIO.
///
/// All lines share one type so a [`CoilLines`](crate::CoilLines) set can
/// mix arbitrary pins.
pub type Esp32Line<'d> = HalLine<PinDriver<'d, AnyOutputPin, Output>>;

/// Configure `pin` as a push-pull output and wrap it as a coil line.
///
/// # Example
///
/// ```ignore
/// use valve_actuator::hal::esp32::esp32_line;
/// use valve_actuator::CoilLines;
///
/// let peripherals = Peripherals::take()?;
/// let lines = CoilLines::three(
///     esp32_line(peripherals.pins.gpio2.into())?,
///     esp32_line(peripherals.pins.gpio3.into())?,
///     esp32_line(peripherals.pins.gpio4.into())?,
/// );
/// ```
pub fn esp32_line<'d>(pin: AnyOutputPin) -> Result<Esp32Line<'d>, EspError> {
    Ok(HalLine::new(PinDriver::output(pin)?))
}
