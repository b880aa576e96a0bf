//! GPIO expanders and the pins they hand out.

mod common;
mod mcp23017;
mod pins;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::Error;

pub use common::{Direction, LogicLevel};
pub use mcp23017::{DEFAULT_ADDRESS, Mcp23017};
pub use pins::{Input, Output};

/// Number of pins on a 16-bit expander, indexed 0..=15.
pub const PIN_COUNT: u8 = 16;

/// A GPIO expander chip that can supply individually configured digital pins.
///
/// Each pin index can be held by at most one pin object at a time. The pin
/// types report errors as [`Error<Self::BusError>`], so bus failures surface
/// as [`Error::Bus`] and acquisition problems as [`Error::Configuration`].
pub trait Expander {
    /// Error type of the bus the expander is attached to.
    type BusError: core::fmt::Debug;
    /// Pin configured as a digital input.
    type Input: InputPin<Error = Error<Self::BusError>>;
    /// Pin configured as a digital output.
    type Output: OutputPin<Error = Error<Self::BusError>>;

    /// Take pin `index` and configure it as an input.
    ///
    /// Where the chip supports it, the internal pull-up is enabled so that an
    /// open switch to ground reads high.
    fn input_pin(&mut self, index: u8) -> Result<Self::Input, Error<Self::BusError>>;

    /// Take pin `index` and configure it as an output, initially driven low.
    fn output_pin(&mut self, index: u8) -> Result<Self::Output, Error<Self::BusError>>;
}
