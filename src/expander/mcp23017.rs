use core::cell::{Cell, RefCell};

use bit_field::BitField;
use embedded_hal::i2c::I2c;

use super::pins::{ExpanderPin, PinNumber};
use super::{Direction, Expander, Input, Output};
use crate::error::{ConfigurationError, Error};

/// I2C address with all three address pins tied low.
///
/// This is the address used by the RGB LCD shield and Pi plate.
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Register addresses with IOCON.BANK = 0 (the power-on default).
///
/// Only the port A address is listed; port B is at the next address.
pub(crate) mod register {
    /// I/O direction, 1 = input.
    pub(crate) const IODIRA: u8 = 0x00;
    /// Pull-up enable, 1 = 100k pull-up.
    pub(crate) const GPPUA: u8 = 0x0C;
    /// Port value. Reads return the pin levels.
    pub(crate) const GPIOA: u8 = 0x12;
    /// Output latch.
    pub(crate) const OLATA: u8 = 0x14;
}

/// Driver for the MCP23017 16-bit I2C GPIO expander.
///
/// # Quick start
///
/// Create the driver with [`Mcp23017::new`], or [`Mcp23017::with_address`] if the
/// address pins are not all tied low. Then take individual pins with
/// [`Mcp23017::input_pin`] and [`Mcp23017::output_pin`]; these implement the
/// traits from [`embedded_hal::digital`].
///
/// Pins hold a shared reference to the driver, so every pin method is a blocking
/// transaction on the bus held inside. The driver is `!Sync` and is meant to be
/// used from one thread.
///
/// A shared reference to the driver implements [`Expander`], which is what
/// [`RgbLcdPlate`] is built from.
///
/// [`RgbLcdPlate`]: crate::RgbLcdPlate
#[derive(Debug)]
pub struct Mcp23017<I2C> {
    i2c: RefCell<I2C>,
    address: u8,
    /// Bit n is set while pin n is held by an [`Input`] or [`Output`].
    pins_taken: Cell<u16>,
}

impl<I2C> Mcp23017<I2C> {
    /// Create a driver for the chip at [`DEFAULT_ADDRESS`].
    ///
    /// No bus traffic happens until a pin is taken.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c: RefCell::new(i2c),
            address: DEFAULT_ADDRESS,
            pins_taken: Cell::new(0),
        }
    }

    /// Create a driver for the chip at `address`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::InvalidAddress`] if `address` is outside 0x20..=0x27.
    pub fn with_address(i2c: I2C, address: u8) -> Result<Self, ConfigurationError> {
        if !(0x20..=0x27).contains(&address) {
            return Err(ConfigurationError::InvalidAddress(address));
        }
        Ok(Self {
            address,
            ..Self::new(i2c)
        })
    }

    /// The I2C address this driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the underlying bus.
    ///
    /// Pins borrow the driver, so this can only be called once they are gone.
    pub fn release(self) -> I2C {
        self.i2c.into_inner()
    }

    /// Mark `pin` as held, failing if it already is.
    pub(super) fn claim(&self, pin: PinNumber) -> Result<(), ConfigurationError> {
        let mut taken = self.pins_taken.get();
        let bit = usize::from(pin.index());
        if taken.get_bit(bit) {
            return Err(ConfigurationError::PinUnavailable(pin.index()));
        }
        taken.set_bit(bit, true);
        self.pins_taken.set(taken);
        Ok(())
    }

    pub(super) fn unclaim(&self, pin: PinNumber) {
        let mut taken = self.pins_taken.get();
        taken.set_bit(usize::from(pin.index()), false);
        self.pins_taken.set(taken);
    }
}

impl<I2C: I2c> Mcp23017<I2C> {
    /// Take pin `index` and configure it as an input with the pull-up enabled.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::PinUnavailable`] if `index` is above 15 or the pin is
    /// already held. Bus errors while writing IODIR or GPPU are returned as
    /// [`Error::Bus`], and the pin is released again.
    pub fn input_pin(&self, index: u8) -> Result<Input<'_, I2C>, Error<I2C::Error>> {
        let pin = ExpanderPin::take(self, index)?;
        let number = pin.number();
        self.modify_bit(
            number.register(register::IODIRA),
            number.bit(),
            Direction::Input.into(),
        )?;
        self.modify_bit(number.register(register::GPPUA), number.bit(), true)?;
        Ok(Input(pin))
    }

    /// Take pin `index` and configure it as an output driven low.
    ///
    /// The latch is cleared before the direction changes so the pin never
    /// briefly drives a stale level.
    ///
    /// # Errors
    ///
    /// As for [`Mcp23017::input_pin`].
    pub fn output_pin(&self, index: u8) -> Result<Output<'_, I2C>, Error<I2C::Error>> {
        let pin = ExpanderPin::take(self, index)?;
        let number = pin.number();
        self.modify_bit(number.register(register::OLATA), number.bit(), false)?;
        self.modify_bit(
            number.register(register::IODIRA),
            number.bit(),
            Direction::Output.into(),
        )?;
        Ok(Output(pin))
    }

    /// Read the levels of all sixteen pins.
    ///
    /// Bit n of the result is pin n. For output pins this is the level on the
    /// pin, which normally matches the latch.
    pub fn read_all(&self) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .borrow_mut()
            .write_read(self.address, &[register::GPIOA], &mut buf)
            .map_err(Error::Bus)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Set the output latches of all sixteen pins.
    ///
    /// Bit n of `levels` is pin n. Latches of input pins are written too but
    /// have no effect until the pin becomes an output.
    pub fn write_all(&self, levels: u16) -> Result<(), Error<I2C::Error>> {
        let [port_a, port_b] = levels.to_le_bytes();
        self.i2c
            .borrow_mut()
            .write(self.address, &[register::OLATA, port_a, port_b])
            .map_err(Error::Bus)
    }

    pub(super) fn read_register(&self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .borrow_mut()
            .write_read(self.address, &[register], &mut buf)
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }

    pub(super) fn write_register(&self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .borrow_mut()
            .write(self.address, &[register, value])
            .map_err(Error::Bus)
    }

    /// Read-modify-write a single bit of a register.
    pub(super) fn modify_bit(
        &self,
        register: u8,
        bit: usize,
        value: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let mut current = self.read_register(register)?;
        current.set_bit(bit, value);
        self.write_register(register, current)
    }
}

impl<'a, I2C: I2c> Expander for &'a Mcp23017<I2C> {
    type BusError = I2C::Error;
    type Input = Input<'a, I2C>;
    type Output = Output<'a, I2C>;

    fn input_pin(&mut self, index: u8) -> Result<Self::Input, Error<Self::BusError>> {
        Mcp23017::input_pin(*self, index)
    }

    fn output_pin(&mut self, index: u8) -> Result<Self::Output, Error<Self::BusError>> {
        Mcp23017::output_pin(*self, index)
    }
}
