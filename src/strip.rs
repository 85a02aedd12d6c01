//! Output side: the [`ColorSink`] trait and a solid-fill strip adapter.
//!
//! [`SolidStrip`] drives any `smart-leds` compatible driver (WS2812 over RMT,
//! SPI or PIO) by writing the same pixel `N` times, scaled by the output
//! brightness the controller hands over at startup.

use palette::Srgb;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

/// Trait for abstracting the LED output.
///
/// Implement this for your strip or LED hardware. The controller only ever
/// renders solid fills.
pub trait ColorSink {
    /// Sets every output pixel to `color`.
    ///
    /// Handle any hardware errors internally - this method cannot fail.
    fn fill(&mut self, color: Srgb<u8>);

    /// Applies the configured output brightness, `255` meaning unscaled.
    ///
    /// Called once by the controller before the first fill. Sinks without
    /// brightness control can keep the default, which ignores it.
    fn set_brightness(&mut self, brightness: u8) {
        let _ = brightness;
    }
}

/// Scales a channel by `brightness`, where 255 leaves the value unchanged.
#[inline]
pub fn scale_channel(value: u8, brightness: u8) -> u8 {
    ((value as u16 * (brightness as u16 + 1)) >> 8) as u8
}

/// Applies `brightness` to all three channels.
#[inline]
pub fn scale_color(color: Srgb<u8>, brightness: u8) -> RGB8 {
    RGB8::new(
        scale_channel(color.red, brightness),
        scale_channel(color.green, brightness),
        scale_channel(color.blue, brightness),
    )
}

/// An `N`-pixel strip showing one color at a fixed brightness.
pub struct SolidStrip<W, const N: usize> {
    writer: W,
    brightness: u8,
    write_errors: u32,
}

impl<W, const N: usize> SolidStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Wraps a driver at full brightness until the controller applies its
    /// configured level.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            brightness: u8::MAX,
            write_errors: 0,
        }
    }

    /// Returns the output brightness in effect.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Returns the number of pixels written per fill.
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns true for a zero-length strip.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns how many fills the driver rejected.
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Returns a reference to the underlying driver.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Releases the underlying driver.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> ColorSink for SolidStrip<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn fill(&mut self, color: Srgb<u8>) {
        let pixel = scale_color(color, self.brightness);
        if self.writer.write(core::iter::repeat_n(pixel, N)).is_err() {
            self.write_errors = self.write_errors.wrapping_add(1);
            warn!("strip write failed ({} total)", self.write_errors);
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        debug!("strip brightness {}", brightness);
        self.brightness = brightness;
    }
}
