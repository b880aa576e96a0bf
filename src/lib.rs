#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod display;
mod error;
pub mod expander;
mod plate;

pub use display::{CharacterLcdRgb, Color, Geometry, LcdPins};
pub use error::{ConfigurationError, Error};
pub use expander::{Expander, Mcp23017};
pub use plate::{BUTTON_PINS, Button, Buttons, LCD_PINS, RgbLcdPlate};
