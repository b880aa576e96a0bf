use bit_field::BitField;
use embedded_hal::i2c::I2c;

use super::mcp23017::register;
use super::{LogicLevel, Mcp23017, PIN_COUNT};
use crate::error::{ConfigurationError, Error};

/// An MCP23017 pin held by an [`Input`] or [`Output`].
///
/// Dropping it hands the pin index back to the driver so it can be taken again.
/// The pin's direction and level in the chip are left as they were.
#[derive(Debug)]
pub(super) struct ExpanderPin<'a, I2C> {
    driver: &'a Mcp23017<I2C>,
    number: PinNumber,
}

impl<'a, I2C> ExpanderPin<'a, I2C> {
    pub(super) fn take(driver: &'a Mcp23017<I2C>, index: u8) -> Result<Self, ConfigurationError> {
        let number = PinNumber::new(index)?;
        driver.claim(number)?;
        Ok(Self { driver, number })
    }

    pub(super) fn number(&self) -> PinNumber {
        self.number
    }
}

impl<I2C> Drop for ExpanderPin<'_, I2C> {
    fn drop(&mut self) {
        self.driver.unclaim(self.number);
    }
}

/// An MCP23017 pin in input mode.
///
/// Obtain one through [`Mcp23017::input_pin`].
#[derive(Debug)]
pub struct Input<'a, I2C>(pub(super) ExpanderPin<'a, I2C>);

impl<I2C: I2c> Input<'_, I2C> {
    /// Get the input level of this pin.
    ///
    /// This is a single read of the pin's GPIO port register.
    pub fn get_level(&self) -> Result<LogicLevel, Error<I2C::Error>> {
        let pin = &self.0;
        let port = pin
            .driver
            .read_register(pin.number.register(register::GPIOA))?;
        Ok(port.get_bit(pin.number.bit()).into())
    }

    /// Index of this pin on the expander.
    pub fn index(&self) -> u8 {
        self.0.number.index()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Input<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::InputPin for Input<'_, I2C> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_low)
    }
}

/// An MCP23017 pin in output mode.
///
/// Obtain one through [`Mcp23017::output_pin`].
#[derive(Debug)]
pub struct Output<'a, I2C>(pub(super) ExpanderPin<'a, I2C>);

impl<I2C: I2c> Output<'_, I2C> {
    /// Set the output level of this pin.
    ///
    /// Other pins on the same port keep their latched levels.
    pub fn set_level(&self, level: LogicLevel) -> Result<(), Error<I2C::Error>> {
        let pin = &self.0;
        pin.driver.modify_bit(
            pin.number.register(register::OLATA),
            pin.number.bit(),
            level.into(),
        )
    }

    /// Get the currently latched output level of this pin.
    pub fn get_output_level(&self) -> Result<LogicLevel, Error<I2C::Error>> {
        let pin = &self.0;
        let latch = pin
            .driver
            .read_register(pin.number.register(register::OLATA))?;
        Ok(latch.get_bit(pin.number.bit()).into())
    }

    /// Index of this pin on the expander.
    pub fn index(&self) -> u8 {
        self.0.number.index()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Output<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::OutputPin for Output<'_, I2C> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::High)
    }
}

impl<I2C: I2c> embedded_hal::digital::StatefulOutputPin for Output<'_, I2C> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_low)
    }
}

/// A validated pin index, 0..=15.
///
/// Pins 0-7 are bits 0-7 of port A, pins 8-15 are bits 0-7 of port B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PinNumber(u8);

impl PinNumber {
    pub(super) fn new(index: u8) -> Result<Self, ConfigurationError> {
        if index < PIN_COUNT {
            Ok(Self(index))
        } else {
            Err(ConfigurationError::PinUnavailable(index))
        }
    }

    pub(super) fn index(self) -> u8 {
        self.0
    }

    /// Bit position within the port register.
    pub(super) fn bit(self) -> usize {
        usize::from(self.0 % 8)
    }

    /// Address of this pin's port register, given the port A address.
    ///
    /// With IOCON.BANK = 0 every port B register directly follows its port A
    /// counterpart.
    pub(super) fn register(self, port_a: u8) -> u8 {
        port_a + self.0 / 8
    }
}
