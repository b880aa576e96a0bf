//! The plate driver: which expander pin does what.

use bit_field::BitField;
use embedded_hal::digital::InputPin;

use crate::display::{CharacterLcdRgb, Color, Geometry, LcdPins};
use crate::error::Error;
use crate::expander::Expander;

/// Expander pins of the buttons, in [`Button::ALL`] order.
pub const BUTTON_PINS: [u8; 5] = [4, 3, 2, 1, 0];

/// Expander pins of the display, in [`LcdPins`] field order: register select,
/// enable, data 4 to 7, red, green, blue, read/write.
pub const LCD_PINS: [u8; 10] = [15, 13, 12, 11, 10, 9, 6, 7, 8, 14];

/// One of the five buttons on the plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Left.
    Left,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Right.
    Right,
    /// Select.
    Select,
}

impl Button {
    /// Every button, in the order their pins are acquired.
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Up,
        Button::Down,
        Button::Right,
        Button::Select,
    ];

    /// Expander pin the button is wired to.
    pub const fn pin(self) -> u8 {
        BUTTON_PINS[self as usize]
    }
}

/// Snapshot of which buttons were held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// True if `button` was held down.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.0.get_bit(button as usize)
    }

    /// True if any button was held down.
    pub fn any(&self) -> bool {
        self.0 != 0
    }

    /// The buttons that were held down, in [`Button::ALL`] order.
    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.is_pressed(*b))
    }
}

/// Driver for an RGB character LCD plate with five buttons behind a 16-pin
/// GPIO expander.
///
/// The buttons pull their pins to ground, so a button reads as pressed when its
/// pin is low. Every button read is one bus transaction; nothing is cached or
/// debounced.
///
/// The display is any [`CharacterLcdRgb`] driver, built here from ten expander
/// output pins and held by the plate. The common display operations are
/// forwarded, and [`RgbLcdPlate::display_mut`] gives access to the rest.
///
/// ```ignore
/// let chip = Mcp23017::new(i2c);
/// let mut plate: RgbLcdPlate<_, MyLcd<_>> = RgbLcdPlate::new(&chip, 16, 2)?;
/// plate.set_message("Hello")?;
/// if plate.select_button()? {
///     plate.set_color(Color::GREEN)?;
/// }
/// ```
pub struct RgbLcdPlate<X: Expander, L> {
    display: L,
    /// Button pins, indexed by `Button as usize`.
    buttons: [X::Input; 5],
    geometry: Geometry,
}

impl<X, L> RgbLcdPlate<X, L>
where
    X: Expander,
    L: CharacterLcdRgb<X::Output>,
{
    /// Take the plate's pins from `expander` and build the display on them.
    ///
    /// The five button pins are configured as inputs, then the ten display pins
    /// as outputs, and the display driver is constructed with `columns` and
    /// `rows`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidGeometry`] if `columns` or `rows` is zero.
    ///   This is checked before touching the expander.
    /// - [`ConfigurationError::PinUnavailable`] if the expander cannot supply one
    ///   of the pins.
    /// - [`Error::Bus`] if configuring a pin or initialising the display fails.
    ///
    /// On error every pin taken so far is dropped.
    ///
    /// [`ConfigurationError::InvalidGeometry`]: crate::ConfigurationError::InvalidGeometry
    /// [`ConfigurationError::PinUnavailable`]: crate::ConfigurationError::PinUnavailable
    pub fn new(mut expander: X, columns: u8, rows: u8) -> Result<Self, Error<X::BusError>> {
        let geometry = Geometry::new(columns, rows)?;

        let buttons = [
            expander.input_pin(Button::Left.pin())?,
            expander.input_pin(Button::Up.pin())?,
            expander.input_pin(Button::Down.pin())?,
            expander.input_pin(Button::Right.pin())?,
            expander.input_pin(Button::Select.pin())?,
        ];

        let [rs, enable, d4, d5, d6, d7, red, green, blue, read_write] = LCD_PINS;
        let pins = LcdPins {
            rs: expander.output_pin(rs)?,
            enable: expander.output_pin(enable)?,
            d4: expander.output_pin(d4)?,
            d5: expander.output_pin(d5)?,
            d6: expander.output_pin(d6)?,
            d7: expander.output_pin(d7)?,
            red: expander.output_pin(red)?,
            green: expander.output_pin(green)?,
            blue: expander.output_pin(blue)?,
            read_write: expander.output_pin(read_write)?,
        };
        let display = L::new(pins, geometry)?;

        Ok(Self {
            display,
            buttons,
            geometry,
        })
    }

    /// True if `button` is held down.
    pub fn button(&mut self, button: Button) -> Result<bool, Error<X::BusError>> {
        self.buttons[button as usize].is_low()
    }

    /// True if the left button is held down.
    pub fn left_button(&mut self) -> Result<bool, Error<X::BusError>> {
        self.button(Button::Left)
    }

    /// True if the up button is held down.
    pub fn up_button(&mut self) -> Result<bool, Error<X::BusError>> {
        self.button(Button::Up)
    }

    /// True if the down button is held down.
    pub fn down_button(&mut self) -> Result<bool, Error<X::BusError>> {
        self.button(Button::Down)
    }

    /// True if the right button is held down.
    pub fn right_button(&mut self) -> Result<bool, Error<X::BusError>> {
        self.button(Button::Right)
    }

    /// True if the select button is held down.
    pub fn select_button(&mut self) -> Result<bool, Error<X::BusError>> {
        self.button(Button::Select)
    }

    /// Read all five buttons.
    ///
    /// Each button is a separate read, so a press that starts or ends midway
    /// may show up for some buttons and not others.
    pub fn buttons(&mut self) -> Result<Buttons, Error<X::BusError>> {
        let mut pressed = 0u8;
        for button in Button::ALL {
            pressed.set_bit(button as usize, self.button(button)?);
        }
        Ok(Buttons(pressed))
    }

    /// Clear the display.
    pub fn clear(&mut self) -> Result<(), Error<X::BusError>> {
        self.display.clear()
    }

    /// Return the cursor to the top left.
    pub fn home(&mut self) -> Result<(), Error<X::BusError>> {
        self.display.home()
    }

    /// Move the cursor to `column`, `row`.
    pub fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), Error<X::BusError>> {
        self.display.set_cursor_position(column, row)
    }

    /// Write `message` at the cursor.
    pub fn set_message(&mut self, message: &str) -> Result<(), Error<X::BusError>> {
        self.display.set_message(message)
    }

    /// Set the backlight colour.
    pub fn set_color(&mut self, color: Color) -> Result<(), Error<X::BusError>> {
        self.display.set_color(color)
    }
}

impl<X: Expander, L> RgbLcdPlate<X, L> {
    /// Size of the display the plate was built for.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The display driver.
    pub fn display(&self) -> &L {
        &self.display
    }

    /// The display driver, for operations the plate does not forward.
    pub fn display_mut(&mut self) -> &mut L {
        &mut self.display
    }

    /// Take the plate apart into its display and button pins.
    ///
    /// The pins are in [`Button::ALL`] order.
    pub fn release(self) -> (L, [X::Input; 5]) {
        (self.display, self.buttons)
    }
}
