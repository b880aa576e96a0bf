//! The character-LCD driver the plate hands its display pins to.
//!
//! This crate does not speak the HD44780 command set itself. Any driver that can
//! be built from the ten control lines in [`LcdPins`] can back an
//! [`RgbLcdPlate`](crate::RgbLcdPlate) by implementing [`CharacterLcdRgb`].

use embedded_hal::digital::OutputPin;

use crate::error::ConfigurationError;

/// Size of a character display in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    columns: u8,
    rows: u8,
}

impl Geometry {
    /// Validate a display size.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidGeometry`] if either dimension is zero.
    pub fn new(columns: u8, rows: u8) -> Result<Self, ConfigurationError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigurationError::InvalidGeometry { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of characters per row.
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> u8 {
        self.rows
    }
}

/// Backlight colour, each channel a brightness percentage in 0..=100.
///
/// Drivers that can only switch the LED channels on or off should treat any
/// non-zero channel as on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Backlight off.
    pub const OFF: Self = Self::new(0, 0, 0);
    /// Red.
    pub const RED: Self = Self::new(100, 0, 0);
    /// Green.
    pub const GREEN: Self = Self::new(0, 100, 0);
    /// Blue.
    pub const BLUE: Self = Self::new(0, 0, 100);
    /// Yellow.
    pub const YELLOW: Self = Self::new(100, 100, 0);
    /// Cyan.
    pub const CYAN: Self = Self::new(0, 100, 100);
    /// Magenta.
    pub const MAGENTA: Self = Self::new(100, 0, 100);
    /// White.
    pub const WHITE: Self = Self::new(100, 100, 100);

    /// Create a colour, clamping each channel to 100.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        const fn clamp(value: u8) -> u8 {
            if value > 100 { 100 } else { value }
        }
        Self {
            red: clamp(red),
            green: clamp(green),
            blue: clamp(blue),
        }
    }

    /// True if every channel is zero.
    pub fn is_off(&self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

/// The control lines of an RGB character LCD in 4-bit mode.
///
/// Field order matches the order in which the plate acquires the pins.
#[derive(Debug)]
pub struct LcdPins<P> {
    /// Register select.
    pub rs: P,
    /// Enable (strobe).
    pub enable: P,
    /// Data line 4.
    pub d4: P,
    /// Data line 5.
    pub d5: P,
    /// Data line 6.
    pub d6: P,
    /// Data line 7.
    pub d7: P,
    /// Red backlight LED.
    pub red: P,
    /// Green backlight LED.
    pub green: P,
    /// Blue backlight LED.
    pub blue: P,
    /// Read/write select.
    pub read_write: P,
}

/// A character-LCD driver with an RGB backlight, built on output pins.
///
/// Errors are those of the pins, so a failing bus write surfaces unchanged.
pub trait CharacterLcdRgb<P: OutputPin>: Sized {
    /// Build the driver on `pins` and initialise a display of size `geometry`.
    fn new(pins: LcdPins<P>, geometry: Geometry) -> Result<Self, P::Error>;

    /// Clear the display and return the cursor to the top left.
    fn clear(&mut self) -> Result<(), P::Error>;

    /// Return the cursor to the top left without clearing.
    fn home(&mut self) -> Result<(), P::Error>;

    /// Move the cursor to `column`, `row` (both zero-based).
    fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), P::Error>;

    /// Write `message` at the cursor. A `'\n'` moves to the start of the next row.
    fn set_message(&mut self, message: &str) -> Result<(), P::Error>;

    /// Set the backlight colour.
    fn set_color(&mut self, color: Color) -> Result<(), P::Error>;
}
